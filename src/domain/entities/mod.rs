//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored code to URL mapping
//! - [`NewUrlRecord`] - Input for creating a mapping

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
