use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpamAssassinRule {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamFilterResults {
    #[serde(default)]
    pub spam_assassin: Vec<SpamAssassinRule>,
}

/// Result of running a message through spam filters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamAnalysisResult {
    pub spam_filter_results: Option<SpamFilterResults>,
    #[serde(default)]
    pub score: f64,
}

/// SPF, DKIM or DMARC verdict.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAuthenticationResult {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub raw_value: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockListResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub result: String,
}

/// Content checks performed on the message body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub embed: bool,
    #[serde(default)]
    pub iframe: bool,
    #[serde(default)]
    pub object: bool,
    #[serde(default)]
    pub script: bool,
    #[serde(default)]
    pub short_urls: bool,
    #[serde(default)]
    pub text_size: u64,
    #[serde(default)]
    pub total_size: u64,
    #[serde(default)]
    pub missing_alt: bool,
    #[serde(default)]
    pub missing_list_unsubscribe: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DnsRecords {
    #[serde(default)]
    pub a: Vec<String>,
    #[serde(default)]
    pub mx: Vec<String>,
    #[serde(default)]
    pub ptr: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpamAssassinResult {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub rules: Vec<SpamAssassinRule>,
}

/// Full deliverability report for a message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverabilityReport {
    pub spf: Option<EmailAuthenticationResult>,
    #[serde(default)]
    pub dkim: Vec<EmailAuthenticationResult>,
    pub dmarc: Option<EmailAuthenticationResult>,
    #[serde(default)]
    pub block_lists: Vec<BlockListResult>,
    pub content: Option<Content>,
    pub dns_records: Option<DnsRecords>,
    pub spam_assassin: Option<SpamAssassinResult>,
}
