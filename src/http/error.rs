//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::constants::sermon::LOAD_FAILED_MESSAGE;
use crate::error::Error;

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Display-ready message
    pub message: String,
}

/// Error type for handlers.
#[derive(Debug)]
pub enum AppError {
    /// Nothing matched (404)
    NotFound(String),
    /// Upstream could not be reached or answered badly (503)
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => Self::NotFound(msg),
            other => {
                tracing::error!("Upstream failure: {other}");
                Self::Unavailable(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }
}
