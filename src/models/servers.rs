use serde::{Deserialize, Serialize};

/// A virtual SMTP/SMS server (inbox).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Server {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default)]
    pub name: String,
    /// Number of messages currently held.
    #[serde(default)]
    pub messages: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerListResult {
    #[serde(default)]
    pub items: Vec<Server>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCreateOptions {
    pub name: String,
}
