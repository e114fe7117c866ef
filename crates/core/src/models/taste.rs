//! User taste snapshot.

use serde::{Deserialize, Serialize};

/// The per-call snapshot of a user's declared preferences and watch history.
///
/// Supplied fresh on every engine call; the engine reads it and never retains
/// or mutates it. Both collections may be empty, and `watched_titles` may
/// name titles the catalog does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteProfile {
    /// Declared favorite genre tags, in selection order.
    #[serde(default)]
    pub preferred_genres: Vec<String>,

    /// Titles marked watched, in the order they were marked.
    #[serde(default)]
    pub watched_titles: Vec<String>,
}

impl TasteProfile {
    pub fn new(preferred_genres: Vec<String>, watched_titles: Vec<String>) -> Self {
        Self {
            preferred_genres,
            watched_titles,
        }
    }

    /// Watch-history depth, the input to the adaptive weight schedule.
    pub fn watch_count(&self) -> usize {
        self.watched_titles.len()
    }

    pub fn has_preferences(&self) -> bool {
        !self.preferred_genres.is_empty()
    }
}
