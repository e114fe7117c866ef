//! Catalog loading and read-only catalog queries.
//!
//! The catalog is an ordered, immutable table of movies loaded once at
//! startup. The title index and genre vocabulary are derived here at load
//! time: every catalog title resolves to a non-empty ordered list of row
//! positions (more than one when the catalog repeats a title), so lookups
//! never have to branch on scalar-versus-list index values.

use flickpick_core::{FlickpickError, Movie, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Rows taken per genre tag by the featured sampler.
const GENRE_SHELF_SIZE: usize = 3;

/// Raw CSV row. Header names bind; extra columns are ignored and missing
/// values degrade per field rather than failing the load.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "Series_Title")]
    title: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "IMDB_Rating")]
    rating: Option<f32>,
    #[serde(rename = "Certificate")]
    certificate: Option<String>,
    #[serde(rename = "Released_Year")]
    released_year: Option<String>,
}

impl CatalogRecord {
    fn into_movie(self) -> Option<Movie> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        Some(Movie {
            title,
            genres: self.genre.unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            certificate: self.certificate,
            released_year: self.released_year,
        })
    }
}

/// The loaded catalog plus the lookup structures derived from it.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<Movie>,
    title_index: HashMap<String, Vec<usize>>,
    genre_labels_lower: Vec<String>,
    genre_vocabulary: Vec<String>,
}

impl Catalog {
    /// Build a catalog from rows already in memory. An empty row set is a
    /// startup error: an engine over nothing can never recommend anything.
    pub fn new(movies: Vec<Movie>) -> Result<Self> {
        if movies.is_empty() {
            return Err(FlickpickError::CatalogLoad("catalog is empty".to_string()));
        }

        let mut title_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, movie) in movies.iter().enumerate() {
            title_index
                .entry(movie.title.clone())
                .or_default()
                .push(position);
        }

        let genre_labels_lower = movies.iter().map(|m| m.genres.to_lowercase()).collect();

        let genre_vocabulary: Vec<String> = movies
            .iter()
            .flat_map(|m| m.genre_tags().into_iter().map(str::to_string))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            movies,
            title_index,
            genre_labels_lower,
            genre_vocabulary,
        })
    }

    /// Load the catalog from a CSV resource.
    ///
    /// Rows that cannot be parsed, and rows without a title, are skipped;
    /// only an unreadable resource or an empty result is fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            FlickpickError::CatalogLoad(format!("failed to open {}: {}", path.display(), e))
        })?;

        let mut movies = Vec::new();
        for (line, result) in reader.deserialize::<CatalogRecord>().enumerate() {
            match result {
                Ok(record) => match record.into_movie() {
                    Some(movie) => movies.push(movie),
                    None => debug!("Skipping catalog row {} without a title", line + 2),
                },
                Err(e) => warn!("Skipping unparseable catalog row {}: {}", line + 2, e),
            }
        }

        let catalog = Self::new(movies)?;
        info!(
            "Loaded {} catalog rows with {} distinct genre tags from {}",
            catalog.len(),
            catalog.genre_vocabulary().len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All rows in catalog order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// The row at `position`. Positions come from this catalog's own index
    /// or ranking, so they are always in range.
    pub fn movie(&self, position: usize) -> &Movie {
        &self.movies[position]
    }

    /// Resolve an exact title to its ordered row positions. `None` means the
    /// title is unknown to the catalog.
    pub fn resolve_title(&self, title: &str) -> Option<&[usize]> {
        self.title_index.get(title).map(Vec::as_slice)
    }

    /// Lowercased genre labels, one per row, in catalog order.
    pub(crate) fn genre_labels_lower(&self) -> &[String] {
        &self.genre_labels_lower
    }

    /// Sorted, deduplicated individual genre tags across the whole catalog.
    pub fn genre_vocabulary(&self) -> &[String] {
        &self.genre_vocabulary
    }

    /// Rows ordered by rating descending, catalog order breaking ties.
    pub fn top_rated(&self, limit: usize) -> Vec<&Movie> {
        self.top_rated_positions()
            .into_iter()
            .take(limit)
            .map(|p| &self.movies[p])
            .collect()
    }

    fn top_rated_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..self.movies.len()).collect();
        positions.sort_by(|&a, &b| {
            self.movies[b]
                .rating
                .partial_cmp(&self.movies[a].rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        positions
    }

    /// The genre-mixed top-rated listing: the top `GENRE_SHELF_SIZE` rows per
    /// genre tag (tags in sorted order), deduplicated by title keeping first
    /// occurrence, minus the caller's watched titles, capped at `limit`.
    /// Guarantees every genre shelf presence instead of letting one
    /// high-rated genre dominate the page.
    pub fn featured(&self, watched_titles: &[String], limit: usize) -> Vec<&Movie> {
        if limit == 0 {
            return Vec::new();
        }
        let ranked = self.top_rated_positions();
        let watched: HashSet<&str> = watched_titles.iter().map(String::as_str).collect();

        let mut picked = Vec::new();
        for tag in &self.genre_vocabulary {
            let needle = tag.to_lowercase();
            picked.extend(
                ranked
                    .iter()
                    .copied()
                    .filter(|&p| self.genre_labels_lower[p].contains(&needle))
                    .take(GENRE_SHELF_SIZE),
            );
        }

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for position in picked {
            let title = self.movies[position].title.as_str();
            if watched.contains(title) || !seen.insert(title) {
                continue;
            }
            rows.push(&self.movies[position]);
            if rows.len() == limit {
                break;
            }
        }
        rows
    }

    /// The rows whose titles exactly match `titles`, in catalog order.
    pub fn rows_for_titles(&self, titles: &[String]) -> Vec<&Movie> {
        let wanted: HashSet<&str> = titles.iter().map(String::as_str).collect();
        self.movies
            .iter()
            .filter(|m| wanted.contains(m.title.as_str()))
            .collect()
    }
}
