//! HTTP transport for search requests.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::FetchError;

/// Raw outcome of one POST: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can POST a form and hand back the response
pub trait SearchTransport {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, String)],
    ) -> Result<TransportResponse, FetchError>;
}

impl<T: SearchTransport + ?Sized> SearchTransport for &T {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, String)],
    ) -> Result<TransportResponse, FetchError> {
        (**self).post_form(url, fields)
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total timeout per request, in seconds. `None` keeps the client default.
    pub timeout_secs: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: format!("fasst-search/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default settings
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a transport with custom settings
    pub fn with_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl SearchTransport for HttpTransport {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, String)],
    ) -> Result<TransportResponse, FetchError> {
        let response = self.client.post(url).form(fields).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(TransportResponse { status, body })
    }
}
