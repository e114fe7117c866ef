//! Domain models for the Flickpick recommendation service.

pub mod movie;
pub mod taste;

pub use movie::Movie;
pub use taste::TasteProfile;
