// src/models/user.rs - Pure data structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Account role, mirrored by the `user_role` enum in Postgres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Admin,
    Normal,
}

/// Represents a registered user
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// The unique ID of the user, assigned by the store
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across the system
    pub email: String,

    /// Argon2 hash of the password (never the plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role deciding admin-list visibility
    pub role: UserRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

// DTO for the signup form. Presence checks only: the email format is
// deliberately not validated.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignupDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// DTO for the login form
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}
