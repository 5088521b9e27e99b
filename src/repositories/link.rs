// src/repositories/link.rs - Data access for shortened links
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::Link;

type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepositoryTrait {
    /// Persists a new link and returns the stored record
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the short id is already taken
    /// * `RepositoryError::Database` - If a database error occurs
    async fn save(&self, short_id: &str, original_url: &str, created_by: &Uuid) -> Result<Link>;

    /// Finds a link by its short id
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>>;

    /// Finds all links created by the given user, oldest first
    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Link>>;

    /// Finds every link in the system, oldest first
    async fn find_all(&self) -> Result<Vec<Link>>;

    /// Appends a visit timestamp to a link's history and returns the
    /// post-append record. One atomic statement: a concurrent visit can
    /// never be lost and the returned history always contains the entry
    /// just added.
    async fn record_visit(
        &self,
        short_id: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<Link>>;
}

// Implementation using the actual database
#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl LinkRepositoryTrait for LinkRepository {
    async fn save(&self, short_id: &str, original_url: &str, created_by: &Uuid) -> Result<Link> {
        let record = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (short_id, original_url, created_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(short_id)
        .bind(original_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert link: {}", e);
            RepositoryError::from(e)
        })?;

        Ok(record)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>> {
        sqlx::query_as::<_, Link>("SELECT * FROM links WHERE short_id = $1")
            .bind(short_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE created_by = $1 ORDER BY created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_all(&self) -> Result<Vec<Link>> {
        sqlx::query_as::<_, Link>("SELECT * FROM links ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn record_visit(
        &self,
        short_id: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<Link>> {
        sqlx::query_as::<_, Link>(
            r#"
            UPDATE links
            SET visit_history = array_append(visit_history, $2),
                updated_at = now()
            WHERE short_id = $1
            RETURNING *
            "#,
        )
        .bind(short_id)
        .bind(visited_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }
}
