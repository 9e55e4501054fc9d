//! HTTP transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::json;
use tracing::{debug, trace};

use natsume_types::Credential;

use crate::{error::*, RawResponse, Transport, TOKEN_HEADER};

const USER_AGENT: &str = concat!("natsume-panel/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by reqwest
///
/// Every call is independent: no retry, no caching, no deduplication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Create new HTTP transport
    ///
    /// `base_url` must be an absolute http(s) URL; trailing slashes
    /// are ignored.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidAddress(format!(
                "{}: unsupported scheme {}",
                base_url,
                parsed.scheme()
            )));
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_secs(10),
        })
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self, credential: &Credential) -> Result<HeaderMap> {
        let mut value =
            HeaderValue::from_str(credential.expose()).map_err(|_| Error::InvalidCredential)?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, value);
        Ok(headers)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<RawResponse> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        debug!("Received HTTP {} ({} bytes)", status, body.len());
        trace!("Body: {}", String::from_utf8_lossy(&body[..body.len().min(512)]));

        Ok(RawResponse::new(status, body))
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            Error::Connect(format!("{}: {}", self.base_url, err))
        } else {
            Error::Http(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_status(&self, credential: &Credential) -> Result<RawResponse> {
        let url = self.url("/status");
        debug!("GET {}", url);

        let request = self.client.get(&url).headers(self.headers(credential)?);
        self.execute(request).await
    }

    async fn remove_binding(&self, mac: &str, credential: &Credential) -> Result<RawResponse> {
        let url = self.url("/bind");
        debug!("POST {} (mac={})", url, mac);

        let request = self
            .client
            .post(&url)
            .headers(self.headers(credential)?)
            .json(&json!({ "mac": mac }));
        self.execute(request).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
