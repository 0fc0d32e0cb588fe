//! # Auth Server
//!
//! A minimal user-authentication HTTP API built with Rust, Axum, and Tokio:
//! registration, login, and retrieval of the current user's profile, backed
//! by PostgreSQL and stateless bearer tokens.
//!
//! ## Features
//! - Async/await HTTP server using the Axum framework
//! - Argon2 password hashing, HS256-signed bearer tokens
//! - PostgreSQL persistence with connection pooling and embedded migrations
//! - Structured logging with tracing
//! - Health check endpoint for monitoring
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Core server initialization and route wiring
//! - `config`: Environment variable configuration management
//! - `auth`: Token service, password hashing, and the middleware gate
//! - `routes`: HTTP route handlers organized by functionality
//! - `database`: Connection pooling, the user model, and migrations
//! - `error`: API error taxonomy and HTTP status mapping
//!
//! ## Environment Setup
//! Requires `JWT_SECRET` and `DATABASE_URL`; a `.env` file is honored in
//! development. Optional: `SERVER_HOST`, `SERVER_PORT`,
//! `DATABASE_MAX_CONNECTIONS`.
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server will start on `http://127.0.0.1:3000` by default. Once
//! running, verify it is operational:
//! ```bash
//! curl http://localhost:3000/ping
//! ```

mod auth;
mod config;
mod database;
mod error;
mod routes;
mod server;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Initializes the tracing/logging system and starts the HTTP server.
/// This function will run indefinitely until the process is terminated.
#[tokio::main]
async fn main() {
    // Load a .env file if present before reading any configuration
    dotenv::dotenv().ok();

    // Initialize the tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting auth server...");
    tracing::info!("📦 Package: {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("🏗️  Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    // Start the HTTP server - this will run indefinitely
    server::start().await;
}
