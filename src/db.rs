use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sqlx::migrate::MigrateDatabase;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Postgres,
};
use thiserror::Error;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),
}

pub type DbResult<T> = Result<T, DatabaseError>;

/// Represents an established database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Database health status
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbHealthStatus {
    Healthy,
    Unhealthy,
}

/// Complete database health check result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseHealth {
    pub status: DbHealthStatus,
    pub response_time_ms: u64,
    pub message: Option<String>,
}

impl Database {
    /// Create a new database connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!("Initializing database connection");
        debug!(
            "Database configuration: max_conn={}, min_conn={}, timeout={}s",
            config.max_connections, config.min_connections, config.connect_timeout_seconds
        );

        // First, check if the database exists
        if !config.skip_db_exists_check {
            Self::ensure_database_exists(config).await?;
        }

        // Create the connection pool
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                DatabaseError::ConnectionError(e)
            })?;

        info!("Successfully connected to database");

        // Run migrations if enabled
        if config.use_migrations {
            Self::run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a pool without establishing any connection, for tests whose
    /// paths never reach the database
    #[cfg(test)]
    pub fn connect_lazy(url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new().connect_lazy(url)?;
        Ok(Self { pool })
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> DatabaseHealth {
        // Measure query execution time
        let start = std::time::Instant::now();

        // Try a simple query to verify the connection is working
        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.get_pool())
            .await;

        let elapsed = start.elapsed();

        match result {
            Ok(_) => DatabaseHealth {
                status: DbHealthStatus::Healthy,
                response_time_ms: elapsed.as_millis() as u64,
                message: None,
            },
            Err(e) => DatabaseHealth {
                status: DbHealthStatus::Unhealthy,
                response_time_ms: elapsed.as_millis() as u64,
                message: Some(format!("Database query failed: {}", e)),
            },
        }
    }

    /// Ensure the target database exists, create it if necessary
    async fn ensure_database_exists(config: &DatabaseConfig) -> DbResult<()> {
        // Extract database name from connection URL
        let url = &config.url;
        let db_name = extract_db_name_from_url(url).ok_or_else(|| {
            DatabaseError::DatabaseNotFound(
                "Could not extract database name from connection string".to_string(),
            )
        })?;

        debug!("Checking if database '{}' exists", db_name);

        // Check if database exists
        let db_exists = Postgres::database_exists(url)
            .await
            .map_err(DatabaseError::ConnectionError)?;

        if !db_exists {
            if config.create_database_if_missing {
                info!("Database '{}' does not exist, creating it", db_name);

                if let Err(err) = Postgres::create_database(url).await {
                    return Err(DatabaseError::DatabaseCreationFailed(format!(
                        "Failed to create database '{}': {}",
                        db_name, err
                    )));
                }

                info!("Successfully created database '{}'", db_name);
            } else {
                return Err(DatabaseError::DatabaseNotFound(format!(
                    "Database '{}' does not exist",
                    db_name
                )));
            }
        } else {
            debug!("Database '{}' exists", db_name);
        }

        Ok(())
    }

    /// Run database migrations
    async fn run_migrations(pool: &PgPool) -> DbResult<()> {
        info!("Running database migrations");

        match sqlx::migrate!("./migrations").run(pool).await {
            Ok(_) => {
                info!("Database migrations completed successfully");
                Ok(())
            }
            Err(e) => {
                warn!("Database migration error: {}", e);
                Err(DatabaseError::MigrationError(e.to_string()))
            }
        }
    }

    /// Gracefully close the database connection pool
    pub async fn shutdown(&self) {
        info!("Shutting down database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

/// Extract database name from a PostgreSQL connection string
fn extract_db_name_from_url(url: &str) -> Option<String> {
    // Split by '/' to get the path part
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 4 {
        return None;
    }

    // The database name is the fourth part, potentially with query params
    let db_with_params = parts[3];

    // Remove query parameters if present
    let db_name = db_with_params.split('?').next()?;

    Some(db_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_db_name() {
        assert_eq!(
            extract_db_name_from_url("postgres://u:p@localhost:5432/linklet"),
            Some("linklet".to_string())
        );
        assert_eq!(
            extract_db_name_from_url("postgres://u:p@localhost:5432/linklet?sslmode=disable"),
            Some("linklet".to_string())
        );
        assert_eq!(extract_db_name_from_url("not-a-url"), None);
    }
}
