//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.
//! Every error, including 500s, is returned with a JSON body.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meal_planner_shared::{ErrorDetail, ErrorResponse, FieldError, ValidationError};
use thiserror::Error;
use tracing::{debug, error};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error")]
    Internal(anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

/// Repository failures arrive as `anyhow` errors; store errors underneath
/// any added context are reported as `Database`.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(db_err) => ApiError::Database(db_err),
            Err(other) => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejection_error(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        rejection_error(rejection.status(), rejection.body_text())
    }
}

/// Oversized bodies keep their 413; every other unreadable request is a 400
fn rejection_error(status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(text)
    } else {
        ApiError::BadRequest(text)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(err) => {
                let rejected: Vec<String> = err.errors.iter().map(FieldError::user_message).collect();
                debug!(?rejected, "Rejected request input");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        code: "VALIDATION_ERROR".to_string(),
                        field: err.single_field().map(str::to_string),
                        details: serde_json::to_value(&err.errors).ok(),
                        message: err.message,
                    },
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, plain("NOT_FOUND", msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, plain("BAD_REQUEST", msg)),
            ApiError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                plain("PAYLOAD_TOO_LARGE", msg),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    plain("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    plain("DATABASE_ERROR", "A database error occurred"),
                )
            }
        };

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

fn plain(code: &str, message: impl Into<String>) -> ErrorDetail {
    ErrorDetail {
        code: code.to_string(),
        message: message.into(),
        field: None,
        details: None,
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use meal_planner_shared::parse_resource_id;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_status() {
        let error = ApiError::from(parse_resource_id("abc", "recipe").unwrap_err());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Invalid recipe ID");
        assert_eq!(body["error"]["field"], "id");
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("Recipe not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_database_error_has_generic_body() {
        let error = ApiError::Database(sqlx::Error::RowNotFound);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert_eq!(body["error"]["message"], "A database error occurred");
    }

    #[tokio::test]
    async fn test_store_error_under_context_maps_to_database() {
        use anyhow::Context;

        let failed: anyhow::Result<()> = Err(sqlx::Error::PoolClosed).context("Failed to list recipes");
        let error = ApiError::from(failed.unwrap_err());
        assert!(matches!(error, ApiError::Database(sqlx::Error::PoolClosed)));

        let body = body_json(error.into_response()).await;
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    }

    #[test]
    fn test_non_store_failure_stays_internal() {
        let error = ApiError::from(anyhow::anyhow!("meal plan 3 has malformed recipe_ids"));
        assert!(matches!(error, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_payload_too_large_keeps_status() {
        let error = rejection_error(StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");

        let error = rejection_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "missing content type".to_string());
        assert!(matches!(error, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_internal_error_has_generic_body() {
        let error = ApiError::Internal(anyhow::anyhow!("corrupt recipe_ids column"));
        let body = body_json(error.into_response()).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("corrupt"));
    }
}
