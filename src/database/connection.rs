// Database Connection Management
//
// Handles PostgreSQL connection pooling using tokio-postgres and deadpool,
// plus the user queries the auth endpoints need.
use anyhow::{Context, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use std::str::FromStr;
use std::time::Duration;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::database::migrations;
use crate::database::models::{FromRow, User};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub max_size: usize,
    pub timeouts: deadpool_postgres::Timeouts,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "".to_string(),
            dbname: "postgres".to_string(),
            max_size: 16,
            timeouts: deadpool_postgres::Timeouts {
                wait: Some(Duration::from_secs(30)),
                create: Some(Duration::from_secs(30)),
                recycle: Some(Duration::from_secs(30)),
            },
        }
    }
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set in the environment")?;

        let config = tokio_postgres::Config::from_str(&database_url)
            .context("Failed to parse DATABASE_URL")?;

        let max_size = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(16);

        Ok(Self {
            host: config.get_hosts().first().map(|h| match h {
                tokio_postgres::config::Host::Tcp(s) => s.clone(),
                tokio_postgres::config::Host::Unix(s) => s.to_string_lossy().to_string(),
            }).unwrap_or_default(),
            port: config.get_ports().first().cloned().unwrap_or(5432),
            user: config.get_user().map(|u| u.to_string()).unwrap_or_default(),
            password: config.get_password().map(|p| String::from_utf8_lossy(p).to_string()).unwrap_or_default(),
            dbname: config.get_dbname().map(|d| d.to_string()).unwrap_or_default(),
            max_size,
            timeouts: deadpool_postgres::Timeouts {
                wait: Some(Duration::from_secs(30)),
                create: Some(Duration::from_secs(30)),
                recycle: Some(Duration::from_secs(30)),
            },
        })
    }
}

/// Database connection wrapper
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: Pool,
}

impl DatabaseConnection {
    /// Create a new database connection with the provided configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let masked_host = format!("{}:{}/{}", config.host, config.port, config.dbname);
        tracing::info!("🔌 Connecting to database: {}", masked_host);

        let mut pg_config = tokio_postgres::Config::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.dbname(&config.dbname);

        let tls_connector = TlsConnector::builder().build().context("Failed to build TLS connector")?;
        let tls = MakeTlsConnector::new(tls_connector);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, tls, mgr_config);

        let pool = Pool::builder(mgr)
            .max_size(config.max_size)
            .wait_timeout(config.timeouts.wait)
            .create_timeout(config.timeouts.create)
            .recycle_timeout(config.timeouts.recycle)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .context("Failed to create database pool")?;

        // Test the connection
        let client = pool
            .get()
            .await
            .context("Failed to get connection from pool")?;

        client
            .query("SELECT 1", &[])
            .await
            .context("Failed to test database connection")?;

        tracing::info!("✅ Database connection established successfully");

        Ok(Self { pool })
    }

    /// Run pending database migrations
    pub async fn migrate(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Fetch a user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt(
                "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE email = $1",
                &[&email],
            )
            .await
            .context("Failed to query user by email")?;
        row.map(|r| User::from_row(&r))
            .transpose()
            .context("Failed to decode user row")
    }

    /// Fetch a user by id
    pub async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt(
                "SELECT id, email, password_hash, created_at, updated_at FROM users WHERE id = $1",
                &[&id],
            )
            .await
            .context("Failed to query user by id")?;
        row.map(|r| User::from_row(&r))
            .transpose()
            .context("Failed to decode user row")
    }

    /// Insert a new user. Timestamps are assigned by the database.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) \
                 RETURNING id, email, password_hash, created_at, updated_at",
                &[&id, &email, &password_hash],
            )
            .await
            .context("Failed to insert user")?;
        User::from_row(&row).context("Failed to decode inserted user row")
    }
}

/// True when the error chain contains a PostgreSQL unique-constraint
/// violation (SQLSTATE 23505), e.g. two concurrent registrations racing
/// on the same email.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<tokio_postgres::Error>())
        .any(|e| e.code() == Some(&SqlState::UNIQUE_VIOLATION))
}
