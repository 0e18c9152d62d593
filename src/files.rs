//! Raw file downloads and polled preview retrieval.

use reqwest::{Method, StatusCode};

use crate::client::{Client, Exchange};
use crate::poll::{Polled, poll};
use crate::{Error, Result};

/// Previews are polled for at most this long; there is no caller override.
const PREVIEW_TIMEOUT_SECS: u64 = 120;

/// File downloads. Obtain with [`Client::files`].
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a Client,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Download an attachment.
    pub async fn get_attachment(&self, id: &str) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("api/files/attachments/{id}"))
            .await
    }

    /// Download a message as a raw EML file.
    pub async fn get_email(&self, id: &str) -> Result<Vec<u8>> {
        self.client.get_bytes(&format!("api/files/email/{id}")).await
    }

    /// Download a rendered preview image, waiting while it is still being
    /// generated.
    ///
    /// Fails with [`Error::Gone`] if the preview was deleted or expired, and
    /// with [`Error::PreviewTimeout`] if it is not ready within two minutes.
    pub async fn get_preview(&self, id: &str) -> Result<Vec<u8>> {
        let path = format!("api/files/screenshots/{id}");

        let polled = poll(
            PREVIEW_TIMEOUT_SECS,
            || self.fetch_preview(&path),
            |_| true,
            is_rendering,
        )
        .await?;

        match polled {
            Polled::Done(bytes) => Ok(bytes),
            Polled::TimedOut(_) => Err(Error::PreviewTimeout { id: id.to_string() }),
        }
    }

    async fn fetch_preview(&self, path: &str) -> Exchange<Vec<u8>> {
        self.client
            .exchange_bytes(Method::GET, path, &[], None::<&()>, StatusCode::OK)
            .await
            .map_err(into_gone)
    }
}

/// 202 Accepted: the preview is queued or rendering.
fn is_rendering(err: &Error) -> bool {
    matches!(err, Error::Api(f) if f.status == StatusCode::ACCEPTED)
}

/// 410 Gone means the preview will never be available.
fn into_gone(err: Error) -> Error {
    match err {
        Error::Api(f) if f.status == StatusCode::GONE => Error::gone(f.body),
        other => other,
    }
}
