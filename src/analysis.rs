//! Spam and deliverability analysis.

use crate::Result;
use crate::client::Client;
use crate::models::{DeliverabilityReport, SpamAnalysisResult};

/// Analysis operations. Obtain with [`Client::analysis`].
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    client: &'a Client,
}

impl<'a> Analysis<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run a message through spam filters.
    pub async fn spam(&self, id: &str) -> Result<SpamAnalysisResult> {
        self.client.get(&format!("api/analysis/spam/{id}")).await
    }

    /// Check SPF, DKIM, DMARC, block lists and content for a message.
    pub async fn deliverability(&self, id: &str) -> Result<DeliverabilityReport> {
        self.client
            .get(&format!("api/analysis/deliverability/{id}"))
            .await
    }
}
