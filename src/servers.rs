//! Server (inbox) management.

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::Result;
use crate::client::Client;
use crate::models::{Server, ServerCreateOptions, ServerListResult};

const SERVERS_PATH: &str = "api/servers";

/// Server operations. Obtain with [`Client::servers`].
#[derive(Debug, Clone, Copy)]
pub struct Servers<'a> {
    client: &'a Client,
}

impl<'a> Servers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List every server in the account.
    pub async fn list(&self) -> Result<ServerListResult> {
        self.client.get(SERVERS_PATH).await
    }

    /// Create a server.
    pub async fn create(&self, options: &ServerCreateOptions) -> Result<Server> {
        self.client.post(SERVERS_PATH, &[], options).await
    }

    /// Fetch a server by id.
    pub async fn get(&self, id: &str) -> Result<Server> {
        self.client.get(&format!("{SERVERS_PATH}/{id}")).await
    }

    /// Replace a server's settings.
    pub async fn update(&self, id: &str, server: &Server) -> Result<Server> {
        self.client
            .put(&format!("{SERVERS_PATH}/{id}"), server)
            .await
    }

    /// Permanently delete a server and all of its messages.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("{SERVERS_PATH}/{id}"), &[])
            .await
    }

    /// Build a random address that delivers to `server_id`.
    ///
    /// No request is made; any local part is accepted by the server.
    ///
    /// # Examples
    /// ```
    /// # use mailosaur_client::Client;
    /// # fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::new("key")?;
    /// let address = client.servers().generate_email_address("abc123");
    /// assert!(address.ends_with("@abc123.mailosaur.net"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn generate_email_address(&self, server_id: &str) -> String {
        format!(
            "{}@{}.{}",
            random_local_part(),
            server_id,
            self.client.smtp_host()
        )
    }
}

fn random_local_part() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_part_is_eight_alphanumerics() {
        let local = random_local_part();
        assert_eq!(local.len(), 8);
        assert!(local.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn address_uses_configured_smtp_host() {
        let client = Client::builder()
            .api_key("key")
            .smtp_host("mail.example.test")
            .build()
            .unwrap();
        let address = client.servers().generate_email_address("srv1");
        let (local, domain) = address.split_once('@').unwrap();
        assert_eq!(local.len(), 8);
        assert_eq!(domain, "srv1.mail.example.test");
    }
}
