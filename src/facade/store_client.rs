//! Client side of the log store RPC interface.

use async_trait::async_trait;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

use crate::facade::error::TransportError;
use crate::proto::log_store_client::LogStoreClient;
use crate::proto::{Empty, LogRequest};
use crate::resilience::with_deadline;

/// The store's answer to a `LogMessage` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAck {
    pub success: bool,
    pub error: String,
}

impl LogAck {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: String::new(),
        }
    }
}

/// Operations the facade needs from the log store.
///
/// `Err` always means the call did not complete; a completed call that
/// reports failure comes back as `Ok(LogAck { success: false, .. })`.
#[async_trait]
pub trait StoreClient: Send + Sync {
    async fn log_message(&self, id: &str, msg: &str) -> Result<LogAck, TransportError>;

    async fn get_messages(&self) -> Result<Vec<String>, TransportError>;
}

/// gRPC implementation of [`StoreClient`].
///
/// Every call opens a fresh channel, so nothing carries over between retry
/// attempts. Connect and call together must finish within `timeout`.
#[derive(Debug, Clone)]
pub struct GrpcStoreClient {
    endpoint: Endpoint,
    timeout: Duration,
}

impl GrpcStoreClient {
    pub fn new(uri: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let uri = uri.into();
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| TransportError::new(format!("invalid URI '{uri}': {e}")))?
            .connect_timeout(timeout)
            .timeout(timeout);

        Ok(Self { endpoint, timeout })
    }

    async fn connect(&self) -> Result<LogStoreClient<Channel>, TransportError> {
        let channel = self.endpoint.connect().await?;
        Ok(LogStoreClient::new(channel))
    }
}

#[async_trait]
impl StoreClient for GrpcStoreClient {
    async fn log_message(&self, id: &str, msg: &str) -> Result<LogAck, TransportError> {
        with_deadline(self.timeout, async {
            let mut client = self.connect().await?;
            let request = LogRequest {
                id: id.to_string(),
                msg: msg.to_string(),
            };
            let reply = client.log_message(request).await?.into_inner();
            Ok::<_, TransportError>(LogAck {
                success: reply.success,
                error: reply.error,
            })
        })
        .await?
    }

    async fn get_messages(&self) -> Result<Vec<String>, TransportError> {
        with_deadline(self.timeout, async {
            let mut client = self.connect().await?;
            let reply = client.get_messages(Empty {}).await?.into_inner();
            Ok::<_, TransportError>(reply.messages)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_uri() {
        let err = GrpcStoreClient::new("not a uri", Duration::from_secs(1)).unwrap_err();
        assert!(err.description().starts_with("invalid URI 'not a uri'"));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GrpcStoreClient::new(format!("http://{addr}"), Duration::from_secs(1)).unwrap();
        assert!(client.log_message("id", "text").await.is_err());
        assert!(client.get_messages().await.is_err());
    }
}
