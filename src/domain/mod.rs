//! Domain layer containing the core data model and ports.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`resolver`] - Name resolution port used for host validation
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete implementations live in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
pub mod resolver;
