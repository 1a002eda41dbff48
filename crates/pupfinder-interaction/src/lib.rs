//! Remote service clients for PupFinder.

mod catalog_client;
mod wire;

pub use catalog_client::HttpCatalogClient;
