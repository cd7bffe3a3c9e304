//! Client for the secondary, plain-text message source.

use async_trait::async_trait;
use std::time::Duration;

use crate::facade::error::{SecondaryError, TransportError};

/// A backend that produces one block of text per request.
#[async_trait]
pub trait SecondarySource: Send + Sync {
    /// Fetch the current text, trimmed of surrounding whitespace.
    async fn fetch(&self) -> Result<String, SecondaryError>;
}

/// HTTP `GET` against a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpSecondarySource {
    client: reqwest::Client,
    url: String,
    timeout_ms: u64,
}

impl HttpSecondarySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).no_proxy().build()?;
        Ok(Self {
            client,
            url: url.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    fn classify(&self, err: reqwest::Error) -> SecondaryError {
        if err.is_timeout() {
            SecondaryError::Timeout(self.timeout_ms)
        } else if let Some(status) = err.status() {
            SecondaryError::Status(status.as_u16())
        } else {
            SecondaryError::Request(TransportError::from_chain(&err).to_string())
        }
    }
}

#[async_trait]
impl SecondarySource for HttpSecondarySource {
    async fn fetch(&self) -> Result<String, SecondaryError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.classify(e))?;

        let text = response.text().await.map_err(|e| self.classify(e))?;
        Ok(text.trim().to_string())
    }
}
