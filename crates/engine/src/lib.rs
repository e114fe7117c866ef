//! Flickpick Recommendation Engine
//!
//! Scores a fixed movie catalog against a caller's taste profile, blending
//! genre affinity with similarity to watched titles under an adaptive weight
//! schedule, and serves the ranked, explained result over a JSON API.

pub mod catalog;
pub mod config;
pub mod reason;
pub mod recommend;
pub mod scoring;
pub mod server;
pub mod similarity;

// Re-export key types
pub use catalog::Catalog;
pub use config::EngineConfig;
pub use reason::Reason;
pub use recommend::RecommendationEngine;
pub use scoring::ScoringWeights;
pub use similarity::SimilarityTable;
