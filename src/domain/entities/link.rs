//! Link entity representing a short code to target URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link with its click counters.
///
/// `code` and `created_at` never change after creation. `clicks`,
/// `last_clicked_at` and `updated_at` are only ever written by the store's
/// atomic click operations.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link as it looks right after insertion.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            clicks: 0,
            last_clicked_at: None,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}
