// src/repositories/user.rs - Data access for users
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::User;

type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait {
    /// Persists a new user and returns the stored record
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the email is already registered
    /// * `RepositoryError::Database` - If a database error occurs
    async fn save(&self, name: &str, email: &str, password_hash: &str) -> Result<User>;

    /// Finds a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Finds a user by its unique identifier
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>>;
}

// Implementation using the actual database
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn save(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let record = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert user: {}", e);
            RepositoryError::from(e)
        })?;

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }
}
