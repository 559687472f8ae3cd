//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Request body for `POST /links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (must be HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub target_url: String,

    /// Optional custom short code.
    #[validate(length(min = 1, max = 8, message = "Custom code must be 1-8 characters"))]
    #[validate(regex(
        path = *CUSTOM_CODE_REGEX,
        message = "Custom code can only contain letters and digits"
    ))]
    pub custom_code: Option<String>,
}

/// Query parameters for `GET /links`.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    /// Case-insensitive substring over code and target URL.
    pub search: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            short_url,
            clicks: link.clicks,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Response body for `DELETE /links/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub deleted: bool,
    pub code: String,
}
