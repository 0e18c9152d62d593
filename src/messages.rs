//! Message listing, polling search and sending.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::{Method, StatusCode};

use crate::client::Client;
use crate::models::{
    Message, MessageCreateOptions, MessageForwardOptions, MessageListResult, MessageReplyOptions,
    PreviewListResult, PreviewRequestOptions, SearchCriteria,
};
use crate::poll::{Polled, poll};
use crate::{Error, Result};

const MESSAGES_PATH: &str = "api/messages";
const SEARCH_PATH: &str = "api/messages/search";
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Parameters for [`Messages::list`].
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Server (inbox) to list.
    pub server: String,
    /// Only include messages received after this instant.
    pub received_after: Option<DateTime<Utc>>,
    /// Zero-based page index.
    pub page: Option<u32>,
    pub items_per_page: Option<u32>,
}

impl ListParams {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    pub fn received_after(mut self, received_after: DateTime<Utc>) -> Self {
        self.received_after = Some(received_after);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }
}

/// Parameters for [`Messages::search`] and [`Messages::get`].
///
/// Unset fields take these defaults:
/// - `received_after`: one hour ago
/// - `timeout`: 10 seconds (`Some(0)` makes a single request without waiting)
/// - `error_on_timeout`: `true`
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Server (inbox) to search.
    pub server: String,
    pub received_after: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub items_per_page: Option<u32>,
    /// Seconds to keep polling for a match.
    pub timeout: Option<u64>,
    /// When `false`, running out of time returns the last (empty) result
    /// instead of [`Error::SearchTimeout`].
    pub error_on_timeout: Option<bool>,
}

impl SearchParams {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    pub fn received_after(mut self, received_after: DateTime<Utc>) -> Self {
        self.received_after = Some(received_after);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn error_on_timeout(mut self, error_on_timeout: bool) -> Self {
        self.error_on_timeout = Some(error_on_timeout);
        self
    }
}

/// Message operations. Obtain with [`Client::messages`].
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    client: &'a Client,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List message summaries in a server, newest first.
    pub async fn list(&self, params: &ListParams) -> Result<MessageListResult> {
        let query = page_query(
            &params.server,
            params.page,
            params.items_per_page,
            params.received_after,
        );
        self.client.get_with_query(MESSAGES_PATH, &query).await
    }

    /// Wait for a single message matching `criteria` and fetch it in full.
    ///
    /// Only the first match is considered. An unset or zero timeout becomes
    /// 10 seconds, so this always waits. Search failures, including running
    /// out of time, are returned as-is.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::{Client, SearchCriteria, SearchParams};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::from_env()?;
    /// let message = client
    ///     .messages()
    ///     .get(
    ///         &SearchParams::new("abc123"),
    ///         &SearchCriteria::new().sent_to("test@abc123.mailosaur.net"),
    ///     )
    ///     .await?;
    /// println!("{}", message.subject);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, params: &SearchParams, criteria: &SearchCriteria) -> Result<Message> {
        let params = SearchParams {
            received_after: Some(params.received_after.unwrap_or_else(default_received_after)),
            page: Some(0),
            items_per_page: Some(1),
            timeout: Some(
                params
                    .timeout
                    .filter(|t| *t > 0)
                    .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS),
            ),
            ..params.clone()
        };

        let result = self.search(&params, criteria).await?;
        let summary = result.items.first().ok_or(Error::SearchTimeout)?;

        self.get_by_id(&summary.id).await
    }

    /// Search for messages, polling until at least one matches.
    ///
    /// The service is asked again after the delay it suggests in each reply
    /// until something matches or waiting longer would exceed the timeout.
    /// Request errors end the search immediately.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::{Client, SearchCriteria, SearchParams};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::from_env()?;
    /// let result = client
    ///     .messages()
    ///     .search(
    ///         &SearchParams::new("abc123").timeout(30).error_on_timeout(false),
    ///         &SearchCriteria::new().subject("Welcome"),
    ///     )
    ///     .await?;
    /// println!("{} match(es)", result.items.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(
        &self,
        params: &SearchParams,
        criteria: &SearchCriteria,
    ) -> Result<MessageListResult> {
        let query = page_query(
            &params.server,
            params.page,
            params.items_per_page,
            Some(params.received_after.unwrap_or_else(default_received_after)),
        );
        let criteria = criteria.with_default_match();
        let timeout = params.timeout.unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS);
        let error_on_timeout = params.error_on_timeout.unwrap_or(true);

        let polled = poll(
            timeout,
            || {
                self.client.exchange(
                    Method::POST,
                    SEARCH_PATH,
                    &query,
                    Some(&criteria),
                    StatusCode::OK,
                )
            },
            |result: &MessageListResult| !result.items.is_empty(),
            |_| false,
        )
        .await?;

        match polled {
            Polled::Done(result) => Ok(result),
            Polled::TimedOut(last) if !error_on_timeout => Ok(last.unwrap_or_default()),
            Polled::TimedOut(_) => Err(Error::SearchTimeout),
        }
    }

    /// Fetch a message by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Message> {
        self.client.get(&format!("{MESSAGES_PATH}/{id}")).await
    }

    /// Permanently delete a message.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("{MESSAGES_PATH}/{id}"), &[])
            .await
    }

    /// Permanently delete every message in a server.
    pub async fn delete_all(&self, server: &str) -> Result<()> {
        self.client
            .delete(MESSAGES_PATH, &[("server", server.to_string())])
            .await
    }

    /// Create a message in a server, sending it if requested.
    pub async fn create(&self, server: &str, options: &MessageCreateOptions) -> Result<Message> {
        self.client
            .post(MESSAGES_PATH, &[("server", server.to_string())], options)
            .await
    }

    /// Forward a received message.
    pub async fn forward(&self, id: &str, options: &MessageForwardOptions) -> Result<Message> {
        self.client
            .post(&format!("{MESSAGES_PATH}/{id}/forward"), &[], options)
            .await
    }

    /// Reply to the sender of a received message.
    pub async fn reply(&self, id: &str, options: &MessageReplyOptions) -> Result<Message> {
        self.client
            .post(&format!("{MESSAGES_PATH}/{id}/reply"), &[], options)
            .await
    }

    /// Request previews of a message in one or more email clients.
    ///
    /// Rendering happens in the background; fetch each image with
    /// [`Files::get_preview`](crate::Files::get_preview).
    pub async fn generate_previews(
        &self,
        id: &str,
        options: &PreviewRequestOptions,
    ) -> Result<PreviewListResult> {
        self.client
            .post(&format!("{MESSAGES_PATH}/{id}/screenshots"), &[], options)
            .await
    }
}

fn default_received_after() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

/// Query parameters shared by listing and search.
fn page_query(
    server: &str,
    page: Option<u32>,
    items_per_page: Option<u32>,
    received_after: Option<DateTime<Utc>>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("server", server.to_string())];

    if let Some(page) = page.filter(|p| *p > 0) {
        query.push(("page", page.to_string()));
    }

    if let Some(items) = items_per_page.filter(|n| *n > 0) {
        query.push(("itemsPerPage", items.to_string()));
    }

    if let Some(after) = received_after {
        query.push((
            "receivedAfter",
            after.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }

    query
}
