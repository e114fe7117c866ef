//! The recommendation engine: scoring, ranking, and explanation over one
//! catalog and one similarity table.

use crate::catalog::Catalog;
use crate::reason::{derive_reason, Reason};
use crate::scoring::score_rows;
use crate::similarity::SimilarityTable;
use flickpick_core::{FlickpickError, Movie, Result, TasteProfile};
use std::collections::HashSet;
use std::path::Path;

/// Genre-matching rows pulled to the front of a ranking so a caller's
/// declared taste is always visible in the first page.
const GENRE_SPOTLIGHT_COUNT: usize = 3;

/// A stateless scorer over immutable catalog data. Construction validates
/// that the similarity table covers the catalog row for row; after that,
/// every call is a pure function of its inputs.
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: Catalog,
    similarity: SimilarityTable,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog, similarity: SimilarityTable) -> Result<Self> {
        if similarity.dimension() != catalog.len() {
            return Err(FlickpickError::ShapeMismatch {
                rows: similarity.dimension(),
                cols: similarity.dimension(),
                catalog: catalog.len(),
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Load both data files and build the engine. Any failure here should
    /// abort startup; there is no degraded mode without data.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(catalog_path: P, similarity_path: Q) -> Result<Self> {
        let catalog = Catalog::load(catalog_path)?;
        let similarity = SimilarityTable::load(similarity_path)?;
        Self::new(catalog, similarity)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rank the catalog for one taste profile and return the top rows.
    pub fn recommend(&self, taste: &TasteProfile, top_n: usize) -> Vec<&Movie> {
        self.recommend_positions(taste, top_n)
            .into_iter()
            .map(|p| self.catalog.movie(p))
            .collect()
    }

    /// Like [`recommend`](Self::recommend), with the evidence for each row.
    pub fn recommend_explained(&self, taste: &TasteProfile, top_n: usize) -> Vec<(&Movie, Reason)> {
        self.recommend_positions(taste, top_n)
            .into_iter()
            .map(|p| {
                let movie = self.catalog.movie(p);
                let reason = derive_reason(&self.catalog, &self.similarity, taste, p, movie);
                (movie, reason)
            })
            .collect()
    }

    /// The evidence tying one catalog title to a taste profile, or `None`
    /// when the catalog does not know the title. A title the catalog repeats
    /// is explained through its first row.
    pub fn explain(&self, title: &str, taste: &TasteProfile) -> Option<Reason> {
        let position = self.catalog.resolve_title(title)?[0];
        Some(derive_reason(
            &self.catalog,
            &self.similarity,
            taste,
            position,
            self.catalog.movie(position),
        ))
    }

    /// The ranking pipeline: score, sort descending with catalog order
    /// breaking ties, drop watched titles, pull genre matches to the front,
    /// deduplicate by title keeping the first occurrence, truncate.
    fn recommend_positions(&self, taste: &TasteProfile, top_n: usize) -> Vec<usize> {
        if top_n == 0 {
            return Vec::new();
        }

        let scores = score_rows(&self.catalog, &self.similarity, taste);

        let mut ranked: Vec<usize> = (0..self.catalog.len()).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let watched: HashSet<&str> = taste.watched_titles.iter().map(String::as_str).collect();
        let survivors: Vec<usize> = ranked
            .into_iter()
            .filter(|&p| !watched.contains(self.catalog.movie(p).title.as_str()))
            .collect();

        let mut ordered = Vec::new();
        if taste.has_preferences() {
            ordered.extend(
                survivors
                    .iter()
                    .copied()
                    .filter(|&p| {
                        self.catalog
                            .movie(p)
                            .matches_any_genre(&taste.preferred_genres)
                    })
                    .take(GENRE_SPOTLIGHT_COUNT),
            );
        }
        ordered.extend(survivors);

        let mut seen = HashSet::new();
        let mut positions = Vec::new();
        for position in ordered {
            if seen.insert(self.catalog.movie(position).title.as_str()) {
                positions.push(position);
                if positions.len() == top_n {
                    break;
                }
            }
        }
        positions
    }
}
