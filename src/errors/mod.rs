//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
///
/// An empty row set is a valid success (`data: []`), distinct from a failed
/// fetch, which carries `error` and no data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database unreachable: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Check if this error means the store could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Classify driver errors: failures to reach the store are connection errors,
/// everything else is a query error. Callers can then tell "fetch failed"
/// apart from a genuinely empty result.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => AppError::Connection(e.to_string()),
            other => AppError::Query(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Connection(msg) => {
                tracing::error!(error = %msg, "Database unreachable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DATABASE_UNAVAILABLE",
                    "Database is unreachable".to_string(),
                )
            }
            AppError::Query(msg) => {
                tracing::error!(error = %msg, "Query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "QUERY_FAILED",
                    "Query failed".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success(vec![1, 2, 3]);
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json["error"].is_null());
    }

    #[test]
    fn api_response_empty_is_success() {
        let response = ApiResponse::success(Vec::<i64>::new());
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
        assert!(json["error"].is_null());
    }

    #[test]
    fn api_response_error() {
        let response = ApiResponse::<()>::error("QUERY_FAILED", "Query failed");
        let json = serde_json::to_value(&response.0).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "QUERY_FAILED");
        assert_eq!(json["error"]["message"], "Query failed");
    }

    #[test]
    fn pool_timeout_is_connection_error() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(err.is_connection());
    }

    #[test]
    fn row_decode_is_query_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Query(_)));
        assert!(!err.is_connection());
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("start_date must not be after end_date".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: start_date must not be after end_date"
        );
    }
}
