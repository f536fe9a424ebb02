//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating the resolver,
//! repository and cache ports, and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::host_validator::HostValidator`] - Accepts only URLs whose host resolves
//! - [`services::shortening_service::ShorteningService`] - Short code creation
//! - [`services::redirect_service::RedirectService`] - Code to URL resolution

pub mod services;
