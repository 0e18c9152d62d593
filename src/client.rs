//! Mailosaur async client and HTTP transport.

use crate::delay::DELAY_HEADER;
use crate::{Analysis, Devices, Error, Files, Messages, Previews, Result, Servers, Usage};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Outcome of a single HTTP exchange.
///
/// The delay hint is kept alongside the result, whether the exchange
/// succeeded or not, so pollers can pace their next attempt.
#[derive(Debug)]
pub(crate) struct Exchange<T> {
    pub(crate) result: Result<T>,
    pub(crate) delay: Option<String>,
}

impl<T> Exchange<T> {
    fn failed(err: Error) -> Self {
        Self {
            result: Err(err),
            delay: None,
        }
    }

    pub(crate) fn map_err(self, f: impl FnOnce(Error) -> Error) -> Self {
        Self {
            result: self.result.map_err(f),
            delay: self.delay,
        }
    }
}

/// Async client for the Mailosaur API.
///
/// Use [`Client::new`] with an API key, [`Client::from_env`], or
/// [`Client::builder`] for custom settings like the endpoint, proxies,
/// and timeouts. Resource groups hang off accessor methods such as
/// [`Client::messages`].
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    user_agent: String,
    smtp_host: String,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the public Mailosaur endpoint.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::Client;
    /// # fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::new("your-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Create a client configured from `MAILOSAUR_*` environment variables.
    ///
    /// See [`ClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env().build()
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// API root every request path is resolved against. Always ends in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Domain used when generating inbound email addresses.
    pub fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    /// Server (inbox) management.
    pub fn servers(&self) -> Servers<'_> {
        Servers::new(self)
    }

    /// Message listing, search and sending.
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    /// Raw attachments, EML files and rendered previews.
    pub fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// Email clients available for preview rendering.
    pub fn previews(&self) -> Previews<'_> {
        Previews::new(self)
    }

    /// Virtual security devices and one-time passwords.
    pub fn devices(&self) -> Devices<'_> {
        Devices::new(self)
    }

    /// Account limits and usage history.
    pub fn usage(&self) -> Usage<'_> {
        Usage::new(self)
    }

    /// Spam and deliverability reports.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis::new(self)
    }

    /// GET a JSON resource.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// GET a JSON resource with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.exchange(Method::GET, path, query, None::<&()>, StatusCode::OK)
            .await
            .result
    }

    /// GET a resource as raw bytes.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.exchange_bytes(Method::GET, path, &[], None::<&()>, StatusCode::OK)
            .await
            .result
    }

    /// POST a JSON body and decode the JSON reply.
    pub(crate) async fn post<T, B>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.exchange(Method::POST, path, query, Some(body), StatusCode::OK)
            .await
            .result
    }

    /// PUT a JSON body and decode the JSON reply.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.exchange(Method::PUT, path, &[], Some(body), StatusCode::OK)
            .await
            .result
    }

    /// DELETE a resource; the service answers 204 No Content.
    pub(crate) async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        self.exchange_bytes(
            Method::DELETE,
            path,
            query,
            None::<&()>,
            StatusCode::NO_CONTENT,
        )
        .await
        .result
        .map(|_| ())
    }

    /// Perform one exchange and decode a JSON reply into `T`.
    pub(crate) async fn exchange<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        expected: StatusCode,
    ) -> Exchange<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let Exchange { result, delay } = self
            .exchange_bytes(method, path, query, body, expected)
            .await;
        let result = result.and_then(|bytes| serde_json::from_slice(&bytes).map_err(Error::from));
        Exchange { result, delay }
    }

    /// Perform one exchange and return the raw reply body.
    ///
    /// Any status other than `expected` is classified into an [`Error`].
    pub(crate) async fn exchange_bytes<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        expected: StatusCode,
    ) -> Exchange<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .query(query)
            .headers(self.headers())
            .basic_auth(&self.api_key, Some(""));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%method, path, error = %e, "request failed");
                return Exchange::failed(e.into());
            }
        };

        let status = response.status();
        let delay = response
            .headers()
            .get(DELAY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        debug!(%method, path, %status, delay = delay.as_deref(), "received response");

        if status != expected {
            let body = if status == StatusCode::NO_CONTENT {
                None
            } else {
                response.text().await.ok()
            };
            return Exchange {
                result: Err(Error::from_status(status, body)),
                delay,
            };
        }

        let result = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(Error::from);

        Exchange { result, delay }
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers
    }
}

const BASE_URL: &str = "https://mailosaur.com/";
const SMTP_HOST: &str = "mailosaur.net";
const USER_AGENT_VALUE: &str = concat!("mailosaur-rust/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_VAR: &str = "MAILOSAUR_API_KEY";
const BASE_URL_VAR: &str = "MAILOSAUR_BASE_URL";
const SMTP_HOST_VAR: &str = "MAILOSAUR_SMTP_HOST";

/// Builder for configuring a Mailosaur client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    user_agent: String,
    smtp_host: String,
    timeout: Duration,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No API key (one must be set before [`build`](Self::build))
    /// - `https://mailosaur.com/` as the API root
    /// - `mailosaur.net` as the SMTP host for generated addresses
    /// - 60 second per-request timeout
    /// - No proxy, strict TLS validation
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            smtp_host: SMTP_HOST.to_string(),
            timeout: REQUEST_TIMEOUT,
            proxy: None,
            danger_accept_invalid_certs: false,
        }
    }

    /// Create a builder seeded from the environment.
    ///
    /// Reads `MAILOSAUR_API_KEY`, and optionally `MAILOSAUR_BASE_URL` and
    /// `MAILOSAUR_SMTP_HOST`. Empty variables are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut builder = Self::new();
        if let Some(key) = var(API_KEY_VAR) {
            builder = builder.api_key(key);
        }
        if let Some(url) = var(BASE_URL_VAR) {
            builder = builder.base_url(url);
        }
        if let Some(host) = var(SMTP_HOST_VAR) {
            builder = builder.smtp_host(host);
        }
        builder
    }

    /// Set the API key used for HTTP basic authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API root.
    ///
    /// Useful for testing against a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the SMTP host used by
    /// [`Servers::generate_email_address`](crate::Servers::generate_email_address).
    pub fn smtp_host(mut self, smtp_host: impl Into<String>) -> Self {
        self.smtp_host = smtp_host.into();
        self
    }

    /// Timeout for each individual HTTP request (default: 60 seconds).
    ///
    /// This bounds a single exchange only; polling operations have their own
    /// budgets.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`Error::MissingApiKey`] when no key was provided.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::Client;
    /// # fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::builder()
    ///     .api_key("your-api-key")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Client {
            http,
            api_key,
            base_url,
            user_agent: self.user_agent,
            smtp_host: self.smtp_host,
            proxy: self.proxy,
        })
    }
}
