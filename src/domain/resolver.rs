//! Name resolution port.

use async_trait::async_trait;
use std::net::IpAddr;

/// Errors returned by a [`HostResolver`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// The lookup failed (NXDOMAIN, no network, resolver error).
    #[error("lookup of {host} failed: {reason}")]
    Lookup { host: String, reason: String },

    /// The lookup did not finish in time.
    #[error("lookup of {host} timed out")]
    Timeout { host: String },
}

/// Resolves a hostname to its addresses.
///
/// Injected into [`crate::application::services::HostValidator`] so the
/// validation path can be exercised without a live resolver.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::SystemResolver`] - OS resolver via `getaddrinfo`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolves `host` to its IP addresses.
    ///
    /// An empty vector means the name exists but has no usable address.
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError>;
}
