//! Application layer for PupFinder.
//!
//! Session gating, the search pipeline, favorites and match generation,
//! composed behind the [`PupFinder`] facade.

pub mod app;
pub mod favorites_store;
pub mod match_engine;
pub mod notice;
pub mod search_pipeline;
pub mod session_gate;

#[cfg(test)]
mod test_support;

pub use app::PupFinder;
pub use favorites_store::FavoritesStore;
pub use match_engine::MatchEngine;
pub use notice::Notice;
pub use search_pipeline::{PipelineOutcome, ResolvedView, SearchPipeline};
pub use session_gate::SessionGate;
