//! Account usage.

use crate::Result;
use crate::client::Client;
use crate::models::{UsageAccountLimits, UsageTransactionListResult};

/// Usage operations. Obtain with [`Client::usage`].
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    client: &'a Client,
}

impl<'a> Usage<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Account limits and current consumption.
    pub async fn limits(&self) -> Result<UsageAccountLimits> {
        self.client.get("api/usage/limits").await
    }

    /// Recent usage history.
    pub async fn transactions(&self) -> Result<UsageTransactionListResult> {
        self.client.get("api/usage/transactions").await
    }
}
