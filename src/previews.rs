//! Email clients available for previews.

use crate::Result;
use crate::client::Client;
use crate::models::EmailClientListResult;

/// Preview operations. Obtain with [`Client::previews`].
#[derive(Debug, Clone, Copy)]
pub struct Previews<'a> {
    client: &'a Client,
}

impl<'a> Previews<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Email clients that previews can be generated in.
    pub async fn list_email_clients(&self) -> Result<EmailClientListResult> {
        self.client.get("api/screenshots/clients").await
    }
}
