//! Handler-level error mapping
//!
//! Store failures surface to the user as error pages: `NotFound` becomes a
//! 404 page, anything else a 500. Admission rejection never reaches this
//! type; the gate answers with the busy page directly.

use crate::pages;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use compass_core::StoreError;

/// Failure of a page operation
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The requested record does not exist
    #[error("company not found with id: {0}")]
    NotFound(i64),

    /// Backend or wiring failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Storage(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(id) => {
                tracing::debug!(id, "page requested for missing company");
                (StatusCode::NOT_FOUND, pages::not_found(id, false))
            }
            Self::Internal(msg) => {
                tracing::error!("page operation failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, pages::internal_error(false))
            }
        };
        (status, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response()
    }
}
