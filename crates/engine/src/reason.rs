//! Human-readable explanations for why a row was recommended.

use crate::catalog::Catalog;
use crate::similarity::SimilarityTable;
use flickpick_core::{Movie, TasteProfile};
use serde::{Deserialize, Serialize};

/// Watched titles below this mean similarity are not worth mentioning.
const SIMILARITY_MENTION_THRESHOLD: f32 = 0.1;

/// At most this many watched titles and this many genres per explanation.
const MAX_MENTIONS: usize = 3;

/// The evidence behind one recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    /// Watched titles the recommendation is similar to, in the caller's
    /// reporting order.
    pub because_watched: Vec<String>,
    /// Preferred genres the recommendation's label contains.
    pub because_genres: Vec<String>,
}

impl Reason {
    pub fn is_empty(&self) -> bool {
        self.because_watched.is_empty() && self.because_genres.is_empty()
    }

    /// Render the reason as a sentence, or `None` when there is no evidence
    /// to point at.
    pub fn render(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.because_watched.is_empty() {
            parts.push(format!("You watched {}", self.because_watched.join(", ")));
        }
        if !self.because_genres.is_empty() {
            parts.push(format!(
                "You selected genre(s) {}",
                self.because_genres.join(", ")
            ));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" and "))
        }
    }
}

/// Collect the evidence tying `movie` to the caller's taste: watched titles
/// whose rows are similar enough to mention, then genres whose pattern the
/// movie's label contains. Both lists keep the profile's own order.
pub(crate) fn derive_reason(
    catalog: &Catalog,
    similarity: &SimilarityTable,
    taste: &TasteProfile,
    movie_position: usize,
    movie: &Movie,
) -> Reason {
    let because_watched = taste
        .watched_titles
        .iter()
        .filter(|title| {
            catalog.resolve_title(title).is_some_and(|positions| {
                similarity.mean_value(positions, movie_position) > SIMILARITY_MENTION_THRESHOLD
            })
        })
        .take(MAX_MENTIONS)
        .cloned()
        .collect();

    let because_genres = taste
        .preferred_genres
        .iter()
        .filter(|genre| movie.matches_genre(genre))
        .take(MAX_MENTIONS)
        .cloned()
        .collect();

    Reason {
        because_watched,
        because_genres,
    }
}
