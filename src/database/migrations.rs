//! Database Migrations
//!
//! Embedded SQL migrations using refinery for tokio-postgres.

use anyhow::{Context, Result};
use deadpool_postgres::Pool;
use std::ops::DerefMut;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations
pub async fn run_migrations(pool: &Pool) -> Result<()> {
    tracing::info!("🔄 Running database migrations...");

    let mut client = pool
        .get()
        .await
        .context("Failed to get connection for migrations")?;

    let report = embedded::migrations::runner()
        .run_async(client.deref_mut().deref_mut())
        .await
        .context("Failed to run database migrations")?;

    for migration in report.applied_migrations() {
        tracing::info!("Applied migration: {}", migration);
    }

    tracing::info!("✅ Database migrations completed successfully");
    Ok(())
}
