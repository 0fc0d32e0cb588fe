//! Auth routes for registration, login, and the current user's profile

use axum::{
    Json, Router,
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::auth::middleware::AuthMiddleware;
use crate::auth::models::{
    AuthUser, LoginRequest, ProfileResponse, RegisterRequest, RegisterResponse, TokenResponse,
    validate_credentials,
};
use crate::auth::password::{hash_password, verify_password};
use crate::database::connection::is_unique_violation;
use crate::error::ApiError;
use crate::server::AppState;

/// Register handler - creates a new user account
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    validate_credentials(&payload.email, &payload.password).map_err(ApiError::Validation)?;

    if app_state
        .db
        .find_user_by_email(&payload.email)
        .await?
        .is_some()
    {
        tracing::warn!("Registration rejected: email already registered");
        return Err(ApiError::Conflict);
    }

    let password_hash = hash_password(&payload.password)?;

    let user = match app_state.db.create_user(&payload.email, &password_hash).await {
        Ok(user) => user,
        // Lost the race against a concurrent registration for the same email
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Registration rejected: unique constraint hit on insert");
            return Err(ApiError::Conflict);
        }
        Err(e) => return Err(ApiError::Internal(e)),
    };

    tracing::info!("User registered: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user: user.into() }),
    ))
}

/// Login handler - authenticates an existing user and issues a token
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_credentials(&payload.email, &payload.password).map_err(ApiError::Validation)?;

    let user = match app_state.db.find_user_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login failed: unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!("Login failed: wrong password for user {}", user.id);
        return Err(ApiError::InvalidCredentials);
    }

    let token = app_state.jwt_service.create_token(user.id, user.email)?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(TokenResponse { token }))
}

/// Profile handler - returns the authenticated user's record
///
/// The subject id comes from the `AuthUser` the middleware attached. A valid
/// token whose user has been deleted out of band resolves to 404.
pub async fn me(
    State(app_state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = app_state
        .db
        .find_user_by_id(auth_user.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(ProfileResponse { user: user.into() }))
}

/// Public auth routes
pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes behind the bearer-token gate
pub fn create_protected_routes(jwt_service: Arc<JwtService>) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .layer(middleware::from_fn_with_state(
            jwt_service,
            AuthMiddleware::validate_token,
        ))
}
