//! Authentication Middleware
//!
//! Axum middleware for JWT token validation and user authentication.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{jwt::JwtService, models::AuthUser};
use crate::error::ApiError;

/// Bearer-token gate for protected routes
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Validate the `Authorization: Bearer <token>` header and attach the
    /// authenticated user to the request.
    ///
    /// Missing header, wrong prefix, empty token, and every verification
    /// failure all map to the same generic 401; the reason is only logged.
    /// The protected handler is never invoked on rejection.
    pub async fn validate_token(
        State(jwt_service): State<Arc<JwtService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty());

        let token = match token {
            Some(token) => token,
            None => {
                tracing::warn!("Missing or malformed Authorization header");
                return Err(ApiError::Unauthorized);
            }
        };

        let claims = match jwt_service.validate_token(token) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::warn!("Token validation failed: {:#}", e);
                return Err(ApiError::Unauthorized);
            }
        };

        let auth_user = AuthUser {
            id: claims.sub,
            email: claims.email,
        };

        // Typed context for downstream handlers
        req.extensions_mut().insert(auth_user);

        Ok(next.run(req).await)
    }
}
