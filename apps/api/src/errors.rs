use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::parsing::text::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(#[from] ExtractionError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable kind, also used as the `code` of the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::ExtractionFailure(_) => "EXTRACTION_FAILED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::UnsupportedFormat(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::ExtractionFailure(e) => {
                tracing::warn!("Text extraction failed: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::UnsupportedFormat("x".into()), StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge("x".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (
                AppError::ExtractionFailure(ExtractionError::Unreadable("bad xref".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_extraction_failure_keeps_cause() {
        let err = AppError::from(ExtractionError::Unreadable("invalid xref table".into()));
        assert_eq!(err.code(), "EXTRACTION_FAILED");
        assert!(err.to_string().contains("invalid xref table"));
    }
}
