//! System DNS resolver using getaddrinfo.

use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

use crate::domain::resolver::{HostResolver, ResolveError};

/// Default upper bound for a single lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Resolves hostnames with `tokio::net::lookup_host`.
///
/// Respects the host's resolver configuration (`/etc/hosts`,
/// `/etc/resolv.conf`). Every lookup is bounded by a timeout so a slow
/// upstream resolver turns into a [`ResolveError::Timeout`] instead of a
/// stalled request.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    /// Creates a resolver with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Creates a resolver with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        resolve_within(self.timeout, host, tokio::net::lookup_host((host, 0))).await
    }
}

/// Awaits `lookup` for at most `timeout` and maps its outcome to resolver errors.
async fn resolve_within<F, I>(
    timeout: Duration,
    host: &str,
    lookup: F,
) -> Result<Vec<IpAddr>, ResolveError>
where
    F: Future<Output = io::Result<I>>,
    I: Iterator<Item = SocketAddr>,
{
    let addrs = tokio::time::timeout(timeout, lookup)
        .await
        .map_err(|_| ResolveError::Timeout {
            host: host.to_string(),
        })?
        .map_err(|e| ResolveError::Lookup {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    let ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
    debug!(host = %host, count = ips.len(), "DNS resolution complete");

    Ok(ips)
}
