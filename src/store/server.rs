//! gRPC server hosting the log store.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::proto::log_store_server::LogStoreServer;
use crate::store::{LogStore, LogStoreService};

/// RPC server for the log store.
pub struct RpcServer {
    store: Arc<LogStore>,
}

impl RpcServer {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self { store }
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<LogStore> {
        self.store.clone()
    }

    /// Serve on `listener` until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), tonic::transport::Error> {
        let addr = listener.local_addr().ok();
        tracing::info!(address = ?addr, "Log store RPC server starting");

        let service = LogStoreServer::new(LogStoreService::new(self.store));

        Server::builder()
            .add_service(service)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
                let _ = shutdown.recv().await;
                tracing::info!("Log store received shutdown signal");
            })
            .await?;

        tracing::info!("Log store RPC server stopped");
        Ok(())
    }
}
