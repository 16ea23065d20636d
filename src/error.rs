//! Request-level failures and their HTTP mapping.
//!
//! | Variant         | Status | Cause                                   |
//! |-----------------|--------|-----------------------------------------|
//! | `Addressing`    | 400    | unknown project/texture/level/…, palette |
//! | `UnknownSize`   | 400    | size tag outside the fixed set          |
//! | `MalformedBody` | 500    | undecodable PUT/POST payload            |
//! | `Transcode`     | 500    | PNG encoder failure                     |
//!
//! Every error body is `text/plain` with the message.

use crate::store::StoreError;
use crate::transcode::TranscodeError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Addressing(#[from] StoreError),
    #[error("Unknown texture size '{0}'")]
    UnknownSize(String),
    #[error("{0}")]
    MalformedBody(String),
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Addressing(_) | ApiError::UnknownSize(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) | ApiError::Transcode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::warn!("Request failed ({}): {}", status, self);
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
