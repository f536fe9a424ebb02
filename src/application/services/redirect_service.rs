//! Code to URL resolution service.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_well_formed;

/// Resolves short codes back to their original URLs.
///
/// # Cache Strategy
///
/// - **Cache hit**: URL returned without touching the store
/// - **Cache miss**: store lookup, then an async cache write
/// - **Cache error**: logged, falls back to the store
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn UrlRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Returns the URL stored for `code`, unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_well_formed(code) {
            return Err(AppError::not_found(json!({ "code": code })));
        }

        match self.cache.get_url(code).await {
            Ok(Some(url)) => return Ok(url),
            Ok(None) => debug!(code = %code, "Cache miss"),
            Err(e) => error!(code = %code, error = %e, "Cache error, falling back to store"),
        }

        let record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(json!({ "code": code })))?;

        let cache = self.cache.clone();
        let code = record.code;
        let url = record.original_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&code, &url, None).await {
                error!(code = %code, error = %e, "Failed to cache URL");
            }
        });

        Ok(record.original_url)
    }
}
