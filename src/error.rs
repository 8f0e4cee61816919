use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database not configured")]
    NotConfigured,

    #[error("Database module not found")]
    ModuleNotFound,

    #[error("{0}")]
    Database(String),

    #[error("Internal server error")]
    Redacted,

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wraps a raw store or handle failure. With `expose` off the caller only
    /// sees a generic detail; the raw text always goes to the log.
    pub fn internal(err: impl std::fmt::Display, expose: bool) -> Self {
        let message = err.to_string();
        tracing::error!("Request failed: {}", message);

        if expose {
            Self::Database(message)
        } else {
            Self::Redacted
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotConfigured
            | ApiError::ModuleNotFound
            | ApiError::Database(_)
            | ApiError::Redacted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotConfigured => {
                tracing::warn!("Database requested but not configured");
            }
            ApiError::ModuleNotFound => {
                tracing::warn!("Database requested but database support is disabled");
            }
            ApiError::Validation(ref message) => {
                tracing::debug!("Request validation error: {}", message);
            }
            ApiError::Database(_) | ApiError::Redacted => {}
        }

        let status = self.status_code();
        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_exposure() {
        let exposed = ApiError::internal("connection refused by db-0:27017", true);
        assert_eq!(exposed.to_string(), "connection refused by db-0:27017");
        assert_eq!(exposed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let redacted = ApiError::internal("connection refused by db-0:27017", false);
        assert_eq!(redacted.to_string(), "Internal server error");
        assert_eq!(redacted.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotConfigured.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::NotConfigured.to_string(), "Database not configured");
        assert_eq!(ApiError::ModuleNotFound.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::ModuleNotFound.to_string(), "Database module not found");
        assert_eq!(
            ApiError::validation("limit must be an integer").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("Body is not JSON");
        assert_eq!(body, json!({ "detail": "Database not configured" }));
    }
}
