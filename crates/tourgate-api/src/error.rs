//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Timed out: {0}")]
    Timeout(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] tourgate_db::DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] tourgate_auth::AuthError),
}

const INTERNAL_MESSAGE: &str = "internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, "malformed request body".to_string())
            }
            ApiError::Auth(e) => {
                if matches!(
                    e,
                    tourgate_auth::AuthError::PasswordHash(_) | tourgate_auth::AuthError::Signing(_)
                ) {
                    error!("Authentication internals failed: {}", e);
                }
                return e.into_response();
            }
            // Duplicates stay a 500: the client learns nothing about which
            // identities exist.
            ApiError::Internal(_) | ApiError::Timeout(_) | ApiError::Database(_) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
