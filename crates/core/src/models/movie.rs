//! Catalog row model.
//!
//! A `Movie` is one immutable row of the recommendation catalog. The genre
//! label is kept as the raw free-text string it was loaded with; matching is
//! case-insensitive substring containment on that label, and tag splitting
//! exists for display and the featured sampler.

use serde::{Deserialize, Serialize};

/// One catalog row.
///
/// Rows are loaded once at startup and never mutated. `certificate` and
/// `released_year` are opaque passthrough fields; the engine never interprets
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Title, the row's identifier. Intended unique; duplicates are tolerated
    /// and handled by position-list resolution in the title index.
    pub title: String,

    /// Free-text genre label, one or more tags delimited by commas
    /// (optionally followed by a space). Empty when the source had no value.
    pub genres: String,

    /// Quality rating on the observed 0-10 scale. Used for the top-rated and
    /// featured listings only, never for recommendation ranking.
    pub rating: f32,

    /// Age certificate, passed through for display.
    pub certificate: Option<String>,

    /// Release year as found in the source data (non-numeric values occur).
    pub released_year: Option<String>,
}

impl Movie {
    /// Individual genre tags: the label split on commas, trimmed, empty
    /// fragments dropped. A label with no delimiter is one tag.
    pub fn genre_tags(&self) -> Vec<&str> {
        self.genres
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Case-insensitive substring containment of `pattern` in the genre
    /// label. This is the matching rule of the scoring genre pass: a textual
    /// contains-check, not tag equality.
    pub fn matches_genre(&self, pattern: &str) -> bool {
        self.genres
            .to_lowercase()
            .contains(&pattern.to_lowercase())
    }

    /// True when the label matches any of the given patterns.
    pub fn matches_any_genre(&self, patterns: &[String]) -> bool {
        let label = self.genres.to_lowercase();
        patterns
            .iter()
            .any(|pattern| label.contains(&pattern.to_lowercase()))
    }
}
