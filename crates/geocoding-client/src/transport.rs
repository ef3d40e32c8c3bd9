//! The HTTP collaborator: one GET per call, body or failure.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::TransportError;

/// Performs a GET for a fully-formed URL and returns the response body.
///
/// Implementations must report non-2xx statuses as
/// [`TransportError::UnexpectedStatus`] so they stay distinct from a
/// well-formed API response with a failing `status`.
pub trait Transport {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        // Strip the URL from reqwest errors: it carries the API key.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let mut url = response.url().clone();
            url.set_query(None);
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        Ok(body)
    }
}
