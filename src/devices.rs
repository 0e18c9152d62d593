//! Virtual security devices and one-time passwords.

use crate::Result;
use crate::client::Client;
use crate::models::{Device, DeviceCreateOptions, DeviceListResult, OtpResult};

const DEVICES_PATH: &str = "api/devices";

/// Device operations. Obtain with [`Client::devices`].
#[derive(Debug, Clone, Copy)]
pub struct Devices<'a> {
    client: &'a Client,
}

impl<'a> Devices<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<DeviceListResult> {
        self.client.get(DEVICES_PATH).await
    }

    pub async fn create(&self, options: &DeviceCreateOptions) -> Result<Device> {
        self.client.post(DEVICES_PATH, &[], options).await
    }

    /// Current one-time password for a device.
    ///
    /// `query` is either a device id or a base32 shared secret. Device ids
    /// contain dashes and secrets never do, which is how the two are told
    /// apart.
    pub async fn otp(&self, query: &str) -> Result<OtpResult> {
        if query.contains('-') {
            return self
                .client
                .get(&format!("{DEVICES_PATH}/{query}/otp"))
                .await;
        }

        let options = DeviceCreateOptions {
            shared_secret: query.to_string(),
            ..DeviceCreateOptions::default()
        };
        self.client
            .post(&format!("{DEVICES_PATH}/otp"), &[], &options)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("{DEVICES_PATH}/{id}"), &[])
            .await
    }
}
