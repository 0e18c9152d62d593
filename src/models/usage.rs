use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UsageAccountLimit {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub current: u64,
}

/// Account limits and how much of each has been used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageAccountLimits {
    pub servers: Option<UsageAccountLimit>,
    pub users: Option<UsageAccountLimit>,
    pub email: Option<UsageAccountLimit>,
    pub sms: Option<UsageAccountLimit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageTransaction {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub email: u64,
    #[serde(default)]
    pub sms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageTransactionListResult {
    #[serde(default)]
    pub items: Vec<UsageTransaction>,
}
