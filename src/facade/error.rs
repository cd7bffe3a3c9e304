//! Facade error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::error::Error as StdError;
use thiserror::Error;

use crate::resilience::DeadlineExceeded;

/// A remote call that did not complete: connection refused, timeout, or a
/// gRPC status instead of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Describe `err` together with its chain of sources.
    pub fn from_chain(err: &(dyn StdError + 'static)) -> Self {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !description.ends_with(&cause_text) {
                description.push_str(": ");
                description.push_str(&cause_text);
            }
            source = cause.source();
        }
        Self(description)
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl From<tonic::Status> for TransportError {
    fn from(status: tonic::Status) -> Self {
        Self(format!("{:?}: {}", status.code(), status.message()))
    }
}

impl From<tonic::transport::Error> for TransportError {
    fn from(err: tonic::transport::Error) -> Self {
        Self::from_chain(&err)
    }
}

impl From<DeadlineExceeded> for TransportError {
    fn from(err: DeadlineExceeded) -> Self {
        Self(err.to_string())
    }
}

/// Failure fetching text from the secondary message source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecondaryError {
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("{0}")]
    Request(String),
}

/// Building facade clients from configuration failed.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid log store endpoint: {0}")]
    Store(TransportError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Every way a facade operation can fail.
///
/// Client mistakes map to 400; anything a backend did or failed to do maps
/// to 502.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacadeError {
    #[error("Missing 'msg' in request body")]
    MissingMessage,

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("LoggingService returned success=false, error={0}")]
    Rejected(String),

    #[error("LoggingService returned error: {0}")]
    InconsistentAck(String),

    #[error("Failed to send to LoggingService after {attempts} attempts: {source}")]
    StoreUnreachable {
        attempts: u32,
        source: TransportError,
    },

    #[error("Failed to get messages from logging-service: {0}")]
    StoreRead(TransportError),

    #[error("Failed to get from messages-service: {0}")]
    Secondary(SecondaryError),
}

impl FacadeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FacadeError::MissingMessage | FacadeError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for FacadeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
