//! Domain layer for PupFinder.
//!
//! Models, the shared error type, and the service traits (ports) that the
//! infrastructure and interaction crates implement.

pub mod config;
pub mod dog;
pub mod error;
pub mod favorites;
pub mod search;
pub mod session;

// Re-export common error type
pub use error::{PupError, Result};

pub use config::ClientConfig;
pub use dog::Dog;
