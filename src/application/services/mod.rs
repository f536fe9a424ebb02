//! Business logic services for the application layer.

pub mod host_validator;
pub mod redirect_service;
pub mod shortening_service;

pub use host_validator::HostValidator;
pub use redirect_service::RedirectService;
pub use shortening_service::{DEFAULT_MAX_ATTEMPTS, ShorteningService};
