//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Short code mapping storage and retrieval

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
