//! Short code creation service.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tracing::{info, warn};

use crate::application::services::HostValidator;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Default number of codes tried before giving up on a request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service for creating short codes.
///
/// Pipeline: validate host, generate a code, insert atomically. A taken code
/// is answered with a fresh code, up to `max_attempts` inserts in total.
pub struct ShorteningService {
    validator: HostValidator,
    repository: Arc<dyn UrlRepository>,
    generator: Arc<CodeGenerator>,
    max_attempts: usize,
}

impl ShorteningService {
    /// Creates a new shortening service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        resolver: Arc<dyn HostResolver>,
        generator: Arc<CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            validator: HostValidator::new(resolver),
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short code for `url`.
    ///
    /// The URL is stored exactly as given. Shortening the same URL twice
    /// yields two independent codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the host validator rejects `url`;
    /// nothing is generated or stored in that case.
    ///
    /// Returns [`AppError::Store`] on storage errors or when every attempt
    /// hit an existing code.
    pub async fn shorten(&self, url: &str) -> Result<UrlRecord, AppError> {
        self.validator.validate(url).await?;

        let retries = std::iter::repeat_n(Duration::ZERO, self.max_attempts - 1);

        let record = RetryIf::spawn(
            retries,
            || self.insert_with_fresh_code(url),
            |e: &AppError| e.is_conflict(),
        )
        .await
        .map_err(|e| {
            if e.is_conflict() {
                AppError::store(
                    "Failed to generate unique code",
                    json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
                )
            } else {
                e
            }
        })?;

        info!(code = %record.code, "Short URL created");

        Ok(record)
    }

    async fn insert_with_fresh_code(&self, url: &str) -> Result<UrlRecord, AppError> {
        let code = self.generator.generate();

        self.repository
            .create(NewUrlRecord::new(code.as_str(), url))
            .await
            .inspect_err(|e| {
                if e.is_conflict() {
                    warn!(code = %code, "Code collision, retrying with a new code");
                }
            })
    }
}
