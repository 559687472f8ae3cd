//! Link creation, lookup, deletion and click counting.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use url::Url;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, generate_code, is_valid_code, validate_custom_code,
};

/// Tuning for generated-code allocation.
#[derive(Debug, Clone, Copy)]
pub struct LinkServiceOptions {
    /// Length of generated codes.
    pub code_length: usize,
    /// Total insert attempts with fresh codes before giving up.
    pub max_attempts: usize,
}

impl Default for LinkServiceOptions {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: 5,
        }
    }
}

/// Service for creating, resolving and managing short links.
///
/// Stateless between calls: every read goes to the repository, which owns the
/// record set and its atomicity guarantees.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    base_url: String,
    options: LinkServiceOptions,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix short codes are appended to.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        Self::with_options(link_repository, base_url, LinkServiceOptions::default())
    }

    pub fn with_options(
        link_repository: Arc<L>,
        base_url: impl Into<String>,
        options: LinkServiceOptions,
    ) -> Self {
        Self {
            link_repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            options,
        }
    }

    /// Creates a short link.
    ///
    /// # Code Allocation
    ///
    /// - With `custom_code`: validated, inserted once. A taken code is reported
    ///   as a conflict; there is no silent fallback to another code.
    /// - Without: a random code is generated and inserted; on conflict a fresh
    ///   code is tried, up to `max_attempts` inserts with a short jittered
    ///   backoff between them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is taken.
    /// Returns [`AppError::AllocationExhausted`] if no generated code was free.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_link(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = validate_target_url(&target_url)?;

        let link = match custom_code {
            Some(code) => self.create_with_custom_code(code, target_url).await?,
            None => self.create_with_generated_code(target_url).await?,
        };

        tracing::info!(code = %link.code, id = link.id, "Short link created");
        Ok(link)
    }

    async fn create_with_custom_code(
        &self,
        code: String,
        target_url: String,
    ) -> Result<Link, AppError> {
        validate_custom_code(&code)?;

        let new_link = NewLink {
            code: code.clone(),
            target_url,
        };

        self.link_repository
            .create(new_link)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Custom code already exists",
                    json!({ "code": code }),
                ),
                other => other,
            })
    }

    async fn create_with_generated_code(&self, target_url: String) -> Result<Link, AppError> {
        let retries = ExponentialBackoff::from_millis(2)
            .max_delay(Duration::from_millis(50))
            .map(jitter)
            .take(self.options.max_attempts.saturating_sub(1));

        let attempt = || {
            let repository = Arc::clone(&self.link_repository);
            let new_link = NewLink {
                code: generate_code(self.options.code_length),
                target_url: target_url.clone(),
            };
            async move { repository.create(new_link).await }
        };

        let retry_on_conflict = |e: &AppError| {
            if e.is_conflict() {
                tracing::debug!("Generated code collided, retrying with a fresh one");
                true
            } else {
                false
            }
        };

        match RetryIf::spawn(retries, attempt, retry_on_conflict).await {
            Err(AppError::Conflict { .. }) => {
                tracing::warn!(
                    attempts = self.options.max_attempts,
                    "Could not allocate a free short code"
                );
                Err(AppError::allocation_exhausted(
                    "Could not allocate a short code, try again",
                    json!({ "attempts": self.options.max_attempts }),
                ))
            }
            other => other,
        }
    }

    /// Resolves a code for redirection, counting the click.
    ///
    /// The click is recorded atomically by the repository before the target is
    /// returned, so every successful redirect is counted exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve_redirect(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        let link = self
            .link_repository
            .record_click(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        tracing::debug!(code = %link.code, clicks = link.clicks, "Redirect recorded");
        Ok(link.target_url)
    }

    /// Counts one click without a redirect (external pingback).
    ///
    /// Same atomic increment as [`Self::resolve_redirect`], but
    /// `last_clicked_at` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn register_click(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        self.link_repository
            .increment_clicks(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Lists links newest first, optionally filtered by a search term.
    ///
    /// A blank search term is treated as no filter. A term containing NUL
    /// matches nothing, since PostgreSQL text cannot hold that byte.
    pub async fn list_links(&self, search: Option<String>) -> Result<Vec<Link>, AppError> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if search.as_deref().is_some_and(|s| s.contains('\0')) {
            return Ok(Vec::new());
        }

        self.link_repository.list(search).await
    }

    /// Deletes a link; its code is reusable right away.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) || !self.link_repository.delete(code).await? {
            return Err(not_found(code));
        }

        tracing::info!(code = %code, "Short link deleted");
        Ok(())
    }

    /// Checks that the link store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}

/// Checks that `target_url` is a non-empty, absolute http(s) URL and returns
/// it without surrounding whitespace.
fn validate_target_url(target_url: &str) -> Result<String, AppError> {
    let target_url = target_url.trim();

    if target_url.is_empty() {
        return Err(AppError::bad_request(
            "Target URL must not be empty",
            json!({}),
        ));
    }

    if target_url.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "Target URL must not contain control characters",
            json!({}),
        ));
    }

    let lowered = target_url.to_ascii_lowercase();
    if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
        return Err(AppError::bad_request(
            "Target URL must start with http:// or https://",
            json!({ "target_url": target_url }),
        ));
    }

    let parsed = Url::parse(target_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::bad_request(
            "Target URL must include a host",
            json!({ "target_url": target_url }),
        ));
    }

    Ok(target_url.to_string())
}
