//! Response bodies for the facade endpoints.
//!
//! `POST /messages` answers JSON; `GET /messages` answers plain text. Errors
//! on either route are JSON (see `FacadeError`'s `IntoResponse`).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Successful `POST /messages` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMessageResponse {
    pub status: String,
    pub id: String,
}

impl PostMessageResponse {
    pub fn ok(id: String) -> Self {
        Self {
            status: "ok".to_string(),
            id,
        }
    }
}

impl IntoResponse for PostMessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Plain-text 200 response.
pub fn plain_text(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], body).into_response()
}
