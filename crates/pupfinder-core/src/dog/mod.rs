//! Dog domain module.
//!
//! # Module Structure
//!
//! - `model`: The `Dog` record as returned by the catalog service

mod model;

pub use model::Dog;
