//! Stub secondary message source.
//!
//! Serves one fixed plain-text body on `GET /messages`. Stands in for the real
//! messages service so the facade can be run and tested end to end.

use axum::{response::Response, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::http::response::plain_text;

/// HTTP server answering `GET /messages` with a constant body.
pub struct MessagesService {
    body: String,
}

impl MessagesService {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn router(&self) -> Router {
        let body = self.body.clone();
        Router::new()
            .route(
                "/messages",
                get(move || {
                    let body = body.clone();
                    async move { respond(body) }
                }),
            )
            .layer(TraceLayer::new_for_http())
    }

    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Messages service starting");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Messages service stopped");
        Ok(())
    }
}

fn respond(body: String) -> Response {
    tracing::debug!("Serving static messages body");
    plain_text(body)
}
