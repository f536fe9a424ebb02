//! Name resolution backed by the operating system resolver.

mod system_resolver;

pub use system_resolver::{DEFAULT_LOOKUP_TIMEOUT, SystemResolver};
