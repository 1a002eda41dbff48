//! Infrastructure for PupFinder: paths, atomic TOML storage, the session
//! record stores and configuration loading.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::PupfinderPaths;
pub use crate::session_store::{InMemorySessionStore, TomlSessionStore};
