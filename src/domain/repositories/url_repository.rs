//! Repository trait for short code mappings.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for code to URL mappings.
///
/// This trait is the only path to the underlying store, so code uniqueness
/// has exactly one enforcement point: [`UrlRepository::create`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// The uniqueness check and the insert happen as one atomic operation; an
    /// existing mapping is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Store`] on storage errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a mapping by its exact code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
