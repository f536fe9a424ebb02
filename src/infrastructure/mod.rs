//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Redirect caching (Redis and no-op implementations)
//! - [`dns`] - System name resolution
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod dns;
pub mod persistence;
