//! Score computation: the adaptive weight schedule and the per-row score
//! vector that the ranking step sorts.

use crate::catalog::Catalog;
use crate::similarity::SimilarityTable;
use flickpick_core::TasteProfile;
use ndarray::Array1;
use tracing::debug;

/// Sentinel assigned to rows the caller has already watched. Any finite
/// accumulated score outranks it, so history can never resurface no matter
/// how strongly both signals favor a row.
pub(crate) const EXCLUDED_ROW_SCORE: f32 = f32::NEG_INFINITY;

/// Relative weight of the genre and watch-history signals. The blend shifts
/// toward history as the caller watches more: a brand-new account is scored
/// on declared genres alone, and after three watches the history signal
/// dominates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Added to a row's score once per preferred genre its label contains.
    pub genre: f32,
    /// Multiplies the row's mean similarity to the watched rows.
    pub watch: f32,
}

impl ScoringWeights {
    /// The schedule keyed by how many watched titles the caller reported.
    pub fn for_watch_count(watch_count: usize) -> Self {
        match watch_count {
            0 => Self {
                genre: 2.0,
                watch: 0.0,
            },
            1..=2 => Self {
                genre: 0.5,
                watch: 3.5,
            },
            _ => Self {
                genre: 0.3,
                watch: 4.0,
            },
        }
    }
}

/// Compute the score vector for one request: genre pass, similarity pass,
/// then the watched-row exclusion sentinel. Watched titles the catalog does
/// not know are skipped and contribute nothing.
pub(crate) fn score_rows(
    catalog: &Catalog,
    similarity: &SimilarityTable,
    taste: &TasteProfile,
) -> Array1<f32> {
    let weights = ScoringWeights::for_watch_count(taste.watch_count());
    debug!(
        "Scoring {} watched titles with genre weight {} and watch weight {}",
        taste.watch_count(),
        weights.genre,
        weights.watch
    );
    let mut scores = Array1::<f32>::zeros(catalog.len());

    for genre in &taste.preferred_genres {
        let needle = genre.to_lowercase();
        for (position, label) in catalog.genre_labels_lower().iter().enumerate() {
            if label.contains(&needle) {
                scores[position] += weights.genre;
            }
        }
    }

    for title in &taste.watched_titles {
        match catalog.resolve_title(title) {
            Some(positions) => {
                scores.scaled_add(weights.watch, &similarity.mean_row(positions));
            }
            None => debug!("Watched title not in catalog, skipping: {}", title),
        }
    }

    for title in &taste.watched_titles {
        if let Some(positions) = catalog.resolve_title(title) {
            for &position in positions {
                scores[position] = EXCLUDED_ROW_SCORE;
            }
        }
    }

    scores
}
