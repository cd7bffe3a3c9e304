use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    msg: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostMessageResponse {
    pub status: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Failure talking to the facade.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The facade answered with a non-success status.
    #[error("facade returned {status}: {error}")]
    Api { status: StatusCode, error: String },
}

pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit one message and return the id the facade assigned to it.
    pub async fn post_message(&self, msg: &str) -> Result<PostMessageResponse, RelayError> {
        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .json(&PostMessageRequest { msg })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, resp).await);
        }
        Ok(resp.json().await?)
    }

    /// Stored messages merged with the secondary source, as plain text.
    pub async fn get_messages(&self) -> Result<String, RelayError> {
        let resp = self
            .client
            .get(format!("{}/messages", self.base_url))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, resp).await);
        }
        Ok(resp.text().await?)
    }
}

async fn api_error(status: StatusCode, resp: reqwest::Response) -> RelayError {
    let text = resp.text().await.unwrap_or_default();
    let error = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    RelayError::Api { status, error }
}
