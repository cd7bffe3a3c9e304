//! gRPC adapter exposing a [`LogStore`] as `msglog.v1.LogStore`.

use std::sync::Arc;
use tonic::{Request, Response, Status};

use crate::proto::{log_store_server, Empty, LogRequest, LogResponse, MessagesResponse};
use crate::store::LogStore;

/// Implementation of the generated `LogStore` service trait.
#[derive(Clone)]
pub struct LogStoreService {
    store: Arc<LogStore>,
}

impl LogStoreService {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl log_store_server::LogStore for LogStoreService {
    async fn log_message(
        &self,
        request: Request<LogRequest>,
    ) -> Result<Response<LogResponse>, Status> {
        let LogRequest { id, msg } = request.into_inner();
        let outcome = self.store.log_message(&id, &msg);

        Ok(Response::new(LogResponse {
            success: outcome.is_success(),
            error: outcome.error().to_string(),
        }))
    }

    async fn get_messages(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<MessagesResponse>, Status> {
        Ok(Response::new(MessagesResponse {
            messages: self.store.messages(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::log_store_server::LogStore as _;
    use crate::store::log_store::MISSING_FIELDS;

    fn log_request(id: &str, msg: &str) -> Request<LogRequest> {
        Request::new(LogRequest {
            id: id.into(),
            msg: msg.into(),
        })
    }

    #[tokio::test]
    async fn test_log_then_get() {
        let service = LogStoreService::new(Arc::new(LogStore::new()));

        let reply = service.log_message(log_request("a", "hello")).await.unwrap().into_inner();
        assert!(reply.success);
        assert!(reply.error.is_empty());

        let listed = service.get_messages(Request::new(Empty {})).await.unwrap().into_inner();
        assert_eq!(listed.messages, vec!["hello"]);
    }

    #[tokio::test]
    async fn test_duplicate_reports_success() {
        let service = LogStoreService::new(Arc::new(LogStore::new()));

        for _ in 0..2 {
            let reply = service.log_message(log_request("a", "hello")).await.unwrap().into_inner();
            assert!(reply.success);
            assert_eq!(reply.error, "");
        }

        let listed = service.get_messages(Request::new(Empty {})).await.unwrap().into_inner();
        assert_eq!(listed.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_reported_in_body() {
        let service = LogStoreService::new(Arc::new(LogStore::new()));

        let reply = service.log_message(log_request("", "hello")).await.unwrap().into_inner();
        assert!(!reply.success);
        assert_eq!(reply.error, MISSING_FIELDS);
    }
}
