//! # Flickpick Core
//!
//! Shared data structures and error types for the Flickpick recommendation
//! service.
//!
//! ## Modules
//!
//! - `error`: Error taxonomy and result alias
//! - `models`: Domain models for catalog rows and user taste snapshots

pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::FlickpickError;
pub use models::movie::Movie;
pub use models::taste::TasteProfile;

/// Result type alias for Flickpick operations
pub type Result<T> = std::result::Result<T, FlickpickError>;
