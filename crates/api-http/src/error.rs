//! HTTP Error Mapping
//!
//! Maps application errors to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use iops_core::error::AppError;
use tracing::error;

/// Status code for an application error
pub fn to_status(err: &AppError) -> StatusCode {
    match err {
        AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wraps AppError so handlers can return it directly
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (to_status(&self.0), self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialization_error() -> AppError {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        AppError::Serialization(err)
    }

    #[tokio::test]
    async fn test_serialization_error_is_500_with_message() {
        let response = ApiError(serialization_error()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Serialization error:"), "body: {:?}", text);
    }
}
