//! Host validation for submitted URLs.

use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use url::{Host, Url};

use crate::domain::resolver::HostResolver;
use crate::error::AppError;

/// Accepts a URL only if it parses and its hostname resolves.
///
/// Resolver errors and timeouts are folded into [`AppError::InvalidUrl`];
/// their detail is logged at debug level and never reaches the client.
pub struct HostValidator {
    resolver: Arc<dyn HostResolver>,
}

impl HostValidator {
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self { resolver }
    }

    /// Validates `url` without transforming it.
    ///
    /// IP literal hosts are accepted without a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if:
    /// - the string contains a NUL character
    /// - the string is not an absolute URL
    /// - the URL has no hostname
    /// - the hostname fails to resolve or resolves to no address
    pub async fn validate(&self, url: &str) -> Result<(), AppError> {
        // The store cannot hold NUL, and the parser would percent-encode it.
        if url.contains('\0') {
            debug!("Rejected URL containing NUL");
            return Err(AppError::invalid_url(json!({ "reason": "NUL character" })));
        }

        let parsed = Url::parse(url).map_err(|e| {
            debug!(url = %url, error = %e, "Rejected unparsable URL");
            AppError::invalid_url(json!({ "reason": e.to_string() }))
        })?;

        let domain = match parsed.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain,
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => return Ok(()),
            _ => {
                debug!(url = %url, "Rejected URL without hostname");
                return Err(AppError::invalid_url(json!({ "reason": "missing host" })));
            }
        };

        match self.resolver.lookup(domain).await {
            Ok(addrs) if !addrs.is_empty() => Ok(()),
            Ok(_) => {
                debug!(host = %domain, "Hostname resolved to no addresses");
                Err(AppError::invalid_url(
                    json!({ "host": domain, "reason": "no addresses" }),
                ))
            }
            Err(e) => {
                debug!(host = %domain, error = %e, "Hostname did not resolve");
                Err(AppError::invalid_url(
                    json!({ "host": domain, "reason": e.to_string() }),
                ))
            }
        }
    }
}
