// src/models/link.rs - Pure data structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// DTO for submitting a URL to shorten. The original URL is required but
// deliberately not checked for well-formedness.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLinkDto {
    #[serde(alias = "orgurl")]
    #[validate(length(min = 1, message = "Original URL is required"))]
    pub original_url: String,
}

/// Represents a shortened link in the system
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Link {
    /// The unique ID of the link
    pub id: Uuid,

    /// The generated short token used as the redirect path segment
    pub short_id: String,

    /// The original, long URL that was shortened
    pub original_url: String,

    /// The user that created this link
    pub created_by: Uuid,

    /// Timestamp of every redirect through this link, in append order
    pub visit_history: Vec<DateTime<Utc>>,

    /// When this link was created
    pub created_at: DateTime<Utc>,

    /// When this link was last updated (i.e. last visited)
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Total number of recorded redirects
    pub fn total_clicks(&self) -> usize {
        self.visit_history.len()
    }
}

/// A link as rendered on the listing pages, with its fully-qualified
/// short URL. `created_by` is only filled on the admin listing.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRow {
    pub short_url: String,
    pub original_url: String,
    pub created_by: String,
}

// DTO for the per-link stats endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkStatsDto {
    pub original_url: String,
    pub short_url: String,
    pub total_clicks: usize,
    pub visit_history: Vec<DateTime<Utc>>,
}
