// Status fetch: the async seam between the watcher and the status provider

use crate::config::ClientConfig;
use serde_json::Value;
use std::future::Future;
use tracing::instrument;

/// Why a poll produced no usable body. The `Display` text becomes the bar's
/// "unavailable (...)" reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("status provider returned HTTP {0}")]
    Status(u16),
    #[error("malformed status response: {0}")]
    Decode(String),
}

/// One request to the status provider. Implementations must not retry.
pub trait StatusFetcher: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Fetches the status JSON over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpStatusFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        let client = match reqwest::Client::builder()
            .user_agent(crate::version::user_agent())
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "status client build failed, using default client");
                reqwest::Client::new()
            }
        };
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.status_url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StatusFetcher for HttpStatusFetcher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_status(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
