//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// The repository is the only writer of the link table. Each method must be
/// atomic with respect to concurrent callers: uniqueness of `code` is enforced
/// by the storage engine on insert, and click counters are incremented
/// server-side in a single statement.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0`.
    ///
    /// The existence check and the insert are one indivisible operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already used by a live link.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists links newest first.
    ///
    /// When `search` is given, only links whose code or target URL contains it
    /// (case-insensitive, literal substring) are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, search: Option<String>) -> Result<Vec<Link>, AppError>;

    /// Records one redirect: `clicks + 1`, `last_clicked_at` and `updated_at`
    /// set to now, as a single atomic read-modify-write.
    ///
    /// Returns the updated link, or `Ok(None)` if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Increments `clicks` by one and refreshes `updated_at` without marking a
    /// redirect. Same atomicity as [`Self::record_click`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Removes a link. The code becomes reusable immediately.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Round-trips to the store. Used by the health probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
