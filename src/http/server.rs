//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the facade handlers
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Bind server to listener and drain on shutdown

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::facade::{Facade, SetupError};
use crate::http::handlers::{get_messages, post_message};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<Facade>,
}

/// HTTP server for the aggregation facade.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server around an already-built facade.
    pub fn new(facade: Facade, request_timeout: Duration) -> Self {
        let state = AppState {
            facade: Arc::new(facade),
        };
        Self {
            router: Self::build_router(state, request_timeout),
        }
    }

    /// Create a server whose facade talks to the backends named in `config`.
    pub fn from_config(config: &RelayConfig) -> Result<Self, SetupError> {
        let facade = Facade::from_config(config)?;
        Ok(Self::new(
            facade,
            Duration::from_secs(config.facade.request_timeout_secs),
        ))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/messages", get(get_messages).post(post_message))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
