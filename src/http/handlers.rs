//! Facade HTTP handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::request::{parse_post_body, request_id};
use crate::http::response::{plain_text, PostMessageResponse};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `POST /messages`: store one message, answer its id.
pub async fn post_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match parse_post_body(&body) {
        Ok(msg) => state.facade.post_message(&msg).await,
        Err(e) => Err(e),
    };

    let response = match result {
        Ok(id) => {
            tracing::info!(request_id = %request_id, id = %id, "Message accepted");
            PostMessageResponse::ok(id).into_response()
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Message not accepted");
            e.into_response()
        }
    };

    metrics::record_request("post_messages", response.status().as_u16(), start);
    response
}

/// `GET /messages`: stored messages merged with the secondary source.
pub async fn get_messages(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let response = match state.facade.get_messages().await {
        Ok(text) => plain_text(text),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Aggregated read failed");
            e.into_response()
        }
    };

    metrics::record_request("get_messages", response.status().as_u16(), start);
    response
}
