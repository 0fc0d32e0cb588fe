//! # Server Module
//!
//! HTTP server setup and route configuration for the auth server.

use axum::{Router, http::Method, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::database::{DatabaseConfig, DatabaseConnection};
use crate::routes::health::ping;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JwtService>,
    pub db: Arc<DatabaseConnection>,
}

/// Starts the auth HTTP server.
///
/// Loads configuration, connects the database pool, runs pending
/// migrations, then binds and serves the router until the process is
/// terminated.
pub async fn start() {
    let config = Config::from_env().expect("Failed to load configuration from environment");

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));

    let db_config = DatabaseConfig::from_env().expect("Failed to load DB config from env");
    let db = Arc::new(
        DatabaseConnection::new(db_config)
            .await
            .expect("Failed to connect to DB"),
    );

    db.migrate().await.expect("Failed to run database migrations");

    let app_state = AppState {
        jwt_service: jwt_service.clone(),
        db,
    };

    // Main app router
    let app = Router::new()
        .route("/ping", get(ping)) // Health check endpoint
        .merge(crate::routes::auth::create_auth_routes())
        .merge(crate::routes::auth::create_protected_routes(jwt_service))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([
                        axum::http::header::ORIGIN,
                        axum::http::header::CONTENT_TYPE,
                        axum::http::header::ACCEPT,
                        axum::http::header::AUTHORIZATION,
                    ]),
            ),
        )
        .with_state(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid SERVER_HOST/SERVER_PORT address");

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address - port may already be in use");

    tracing::info!("🚀 Auth server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/ping", addr);
    tracing::info!("🔐 Auth endpoints: POST /register, POST /login, GET /me");

    axum::serve(listener, app).await.unwrap();
}
