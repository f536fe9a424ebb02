//! Url record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A stored mapping from a short code to the caller-supplied URL.
///
/// Records are immutable once created: the code is never reassigned and the
/// URL is kept exactly as it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
        }
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub code: String,
    pub original_url: String,
}

impl NewUrlRecord {
    pub fn new(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
        }
    }
}
