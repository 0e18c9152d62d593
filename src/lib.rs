//! # Mailosaur Client
//! Asynchronous wrapper around the Mailosaur email and SMS testing HTTP API, providing methods to manage servers, wait for and search messages, download attachments and previews, and generate one-time passwords from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who need to assert on real email or SMS delivery in integration tests: point your application at a Mailosaur server address, then use [`Messages::get`] or [`Messages::search`] to wait for the message to land.
//!
//! ## Waiting for results
//! Message search and preview downloads poll the service. After each reply the client sleeps for the delay the service suggests (the `x-ms-delay` header, default one second) and gives up once the next sleep would exceed the budget: [`SearchParams::timeout`] for searches (10 seconds unless set) and a fixed two minutes for previews. Network failures and rejected requests are never retried.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. The crate emits `tracing` events and leaves subscriber setup to the application.
//!
//! ## Errors
//! Every failure is an [`Error`] variant; [`Error::kind`] gives the stable kind string (`invalid_request`, `search_timeout`, `gone`, ...) and [`Error::status`] / [`Error::body`] expose the HTTP details. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailosaur_client::{Client, SearchCriteria, SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailosaur_client::Error> {
//!     let client = Client::from_env()?;
//!     let address = client.servers().generate_email_address("abc123");
//!     println!("Send something to: {}", address);
//!
//!     let message = client
//!         .messages()
//!         .get(&SearchParams::new("abc123"), &SearchCriteria::new().sent_to(&address))
//!         .await?;
//!     println!("Subject: {}", message.subject);
//!
//!     client.messages().delete(&message.id).await?;
//!     Ok(())
//! }
//! ```

mod analysis;
mod client;
mod delay;
mod devices;
mod error;
mod files;
mod messages;
mod models;
mod poll;
mod previews;
mod servers;
mod usage;

pub use analysis::Analysis;
pub use client::{Client, ClientBuilder};
pub use delay::DelaySchedule;
pub use devices::Devices;
pub use error::{ApiFailure, Error, ErrorKind};
pub use files::Files;
pub use messages::{ListParams, Messages, SearchParams};
pub use models::*;
pub use previews::Previews;
pub use servers::Servers;
pub use usage::Usage;

/// Result type alias for Mailosaur operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
