//! Precomputed pairwise similarity table.
//!
//! The table is a square f32 matrix whose row order matches catalog row
//! order. It is prepared offline, shipped as a binary resource, loaded once
//! at startup, and never mutated. Watched-item exclusion never relies on
//! self-similarity values; rows are excluded explicitly by the engine.

use anyhow::Context;
use flickpick_core::{FlickpickError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// On-disk representation: shape plus row-major data, bincode-encoded.
#[derive(Debug, Serialize, Deserialize)]
struct SerializableSimilarity {
    shape: (usize, usize),
    data: Vec<f32>,
}

/// In-memory pairwise similarity scores, indexed by catalog row position.
#[derive(Debug)]
pub struct SimilarityTable {
    matrix: Array2<f32>,
}

impl SimilarityTable {
    /// Wrap an already-built matrix. Fails unless the matrix is square.
    pub fn from_matrix(matrix: Array2<f32>) -> Result<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(FlickpickError::SimilarityLoad(format!(
                "matrix is {}x{}, expected square",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        Ok(Self { matrix })
    }

    /// Build from nested rows. Fixture helper and offline-preparation entry
    /// point; every row must have one value per catalog row.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in &rows {
            if row.len() != n {
                return Err(FlickpickError::SimilarityLoad(format!(
                    "row has {} values, expected {}",
                    row.len(),
                    n
                )));
            }
            data.extend_from_slice(row);
        }
        let matrix = Array2::from_shape_vec((n, n), data)
            .map_err(|e| FlickpickError::SimilarityLoad(e.to_string()))?;
        Self::from_matrix(matrix)
    }

    /// Load the bincode-encoded table from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let table = Self::read_file(path.as_ref())
            .map_err(|e| FlickpickError::SimilarityLoad(format!("{:#}", e)))?;
        info!(
            "Loaded similarity table ({}x{})",
            table.dimension(),
            table.dimension()
        );
        Ok(table)
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let serializable: SerializableSimilarity =
            bincode::deserialize(&bytes).context("failed to decode similarity table")?;
        let matrix = Array2::from_shape_vec(serializable.shape, serializable.data)
            .context("failed to reconstruct similarity matrix")?;
        Ok(Self::from_matrix(matrix)?)
    }

    /// Write the table in the on-disk format. Used by fixture generation and
    /// offline resource preparation.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serializable = SerializableSimilarity {
            shape: (self.matrix.nrows(), self.matrix.ncols()),
            data: self.matrix.iter().copied().collect(),
        };
        let bytes = bincode::serialize(&serializable)
            .map_err(|e| FlickpickError::SimilarityLoad(e.to_string()))?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Number of rows (== columns == catalog rows the table was built for).
    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }

    /// Similarity of every catalog row to the item at `position`.
    ///
    /// `position` must be below `dimension()`; engine construction
    /// guarantees that for positions coming from the title index.
    pub fn row(&self, position: usize) -> ArrayView1<'_, f32> {
        self.matrix.row(position)
    }

    /// Elementwise mean of the rows at `positions`, the one similarity
    /// vector representing a title that occupies several catalog rows.
    /// Returns all zeros for an empty position list.
    pub fn mean_row(&self, positions: &[usize]) -> Array1<f32> {
        let mut acc = Array1::zeros(self.dimension());
        if positions.is_empty() {
            return acc;
        }
        for &position in positions {
            acc += &self.matrix.row(position);
        }
        acc / positions.len() as f32
    }

    /// Similarity between the item at `a` and the item at `b`.
    pub fn value(&self, a: usize, b: usize) -> f32 {
        self.matrix[[a, b]]
    }

    /// Mean similarity between a (possibly duplicated) title at `positions`
    /// and the single item at `target`. Zero for an empty position list.
    pub fn mean_value(&self, positions: &[usize], target: usize) -> f32 {
        if positions.is_empty() {
            return 0.0;
        }
        let sum: f32 = positions.iter().map(|&p| self.value(p, target)).sum();
        sum / positions.len() as f32
    }
}
