use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A virtual security device that generates one-time passwords.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListResult {
    #[serde(default)]
    pub items: Vec<Device>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreateOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Base32 secret shared with the service that issues the codes.
    pub shared_secret: String,
}

/// A current one-time password.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpResult {
    pub code: String,
    pub expires: Option<DateTime<Utc>>,
}
