//! # Database Module
//!
//! PostgreSQL integration using tokio-postgres with deadpool pooling.
//! Includes connection management, the user row model, and migrations.

pub mod connection;
pub mod migrations;
pub mod models;

pub use connection::{DatabaseConfig, DatabaseConnection};
pub use models::User;
