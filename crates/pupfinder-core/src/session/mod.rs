//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Login credentials and the local session record
//! - `service`: Remote login/logout trait
//! - `repository`: Local session record storage trait

mod model;
mod repository;
mod service;

pub use model::{Credentials, DEFAULT_SESSION_TTL_SECS, SESSION_KEY, SessionRecord};
pub use repository::SessionStore;
pub use service::AuthService;
