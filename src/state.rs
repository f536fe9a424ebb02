//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShorteningService};
use crate::domain::repositories::UrlRepository;
use crate::domain::resolver::HostResolver;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;

/// Services and ports shared across requests.
///
/// Cloning is cheap: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<ShorteningService>,
    pub redirect_service: Arc<RedirectService>,
    pub url_repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the services from their injected dependencies.
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        resolver: Arc<dyn HostResolver>,
        cache: Arc<dyn CacheService>,
        generator: Arc<CodeGenerator>,
        max_code_attempts: usize,
    ) -> Self {
        let shortening_service = Arc::new(ShorteningService::new(
            url_repository.clone(),
            resolver,
            generator,
            max_code_attempts,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            url_repository.clone(),
            cache.clone(),
        ));

        Self {
            shortening_service,
            redirect_service,
            url_repository,
            cache,
        }
    }
}
