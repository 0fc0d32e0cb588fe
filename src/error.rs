//! API error taxonomy and HTTP status mapping
//!
//! Every error a handler can produce is caught here and turned into a
//! status code plus a JSON body. Internal failures are logged with full
//! detail server-side; the caller only ever sees a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single failed field in a request body
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body, with per-field detail
    #[error("Invalid request body")]
    Validation(Vec<FieldError>),

    #[error("Email already registered")]
    Conflict,

    /// Unknown email or wrong password. Both map to the same message so the
    /// caller cannot tell which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or tampered bearer token. All token
    /// failures share this message.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::Internal(err) = &self {
            tracing::error!("Internal error: {:#}", err);
        }

        let body = match &self {
            ApiError::Validation(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_itemizes_fields() {
        let err = ApiError::Validation(vec![FieldError {
            field: "password",
            message: "Password must be at least 8 characters".to_string(),
        }]);

        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = body_json(res).await;
        assert_eq!(body["message"], "Invalid request body");
        assert_eq!(body["errors"][0]["field"], "password");
    }

    #[tokio::test]
    async fn credential_and_token_failures_share_a_status() {
        let res = ApiError::InvalidCredentials.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await["message"], "Invalid credentials");

        let res = ApiError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn internal_error_is_generic_to_the_caller() {
        let res = ApiError::Internal(anyhow::anyhow!("pool exhausted on segment 3")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn conflict_and_not_found_mapping() {
        assert_eq!(ApiError::Conflict.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }
}
