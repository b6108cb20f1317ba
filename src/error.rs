use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Errors surfaced by the HTTP handlers.
///
/// Store failures keep their cause for the log but only the generic message
/// reaches the caller.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", message)]
    Internal {
        message: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn missing_fields() -> Self {
        Self::Validation("Missing required fields".to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Adapter for `map_err` on store calls.
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Internal { message, source }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal { message, source } = self {
            error!(error = %source, "{}", message);
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
