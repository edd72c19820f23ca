//! Core domain types for the movie catalog.
//!
//! The catalog is two precomputed artifacts loaded as a matched pair: a movie
//! table and a square similarity matrix whose row/column order matches the
//! table's row order exactly. Nothing here is mutated after load.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ArtifactLoadError, Result};

/// External identifier for a movie, used to query the poster/catalog API
pub type CatalogId = u32;

/// Internal 0-based position of a movie in the similarity matrix,
/// fixed at load time
pub type RowIndex = usize;

/// A single entry in the movie table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub catalog_id: CatalogId,
    pub title: String,
}

/// Dense square similarity matrix stored as one flat buffer.
///
/// Entry (i, j) is the precomputed similarity between movies i and j.
/// Symmetric by construction and diagonal-maximal, though neither is
/// enforced at lookup time.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    pub(crate) fn new(dim: usize, scores: Vec<f32>) -> Self {
        debug_assert_eq!(scores.len(), dim * dim);
        Self { dim, scores }
    }

    /// Matrix dimension (== number of movies)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Full similarity row for one movie
    pub fn row(&self, index: RowIndex) -> Option<&[f32]> {
        if index < self.dim {
            Some(&self.scores[index * self.dim..(index + 1) * self.dim])
        } else {
            None
        }
    }
}

/// The in-memory catalog: movie table, similarity matrix, and a
/// title -> row index map built once at load time for O(1) resolution.
///
/// Read-only after construction, so it can be shared across tasks behind an
/// `Arc` with no locking.
#[derive(Debug)]
pub struct CatalogStore {
    movies: Vec<Movie>,
    title_index: HashMap<String, RowIndex>,
    similarity: SimilarityMatrix,
}

impl CatalogStore {
    /// Build a store from already-parsed parts, validating that the two
    /// artifacts form a matched pair.
    ///
    /// Checks:
    /// - number of similarity rows == number of movies
    /// - every row has exactly one score per movie (square matrix)
    ///
    /// Row order in `movies` defines row_index; if two movies share a title,
    /// the first occurrence wins for title resolution.
    pub fn from_parts(movies: Vec<Movie>, rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = movies.len();

        if rows.len() != dim {
            return Err(ArtifactLoadError::DimensionMismatch {
                movies: dim,
                rows: rows.len(),
            });
        }

        let mut scores = Vec::with_capacity(dim * dim);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(ArtifactLoadError::RaggedRow {
                    row: row_index,
                    expected: dim,
                    found: row.len(),
                });
            }
            scores.extend_from_slice(row);
        }

        // First match in table order wins for duplicate titles
        let mut title_index = HashMap::with_capacity(dim);
        for (row_index, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(row_index);
        }

        Ok(Self {
            movies,
            title_index,
            similarity: SimilarityMatrix::new(dim, scores),
        })
    }

    /// Resolve a title to its row index (exact, case-sensitive match)
    pub fn resolve_title(&self, title: &str) -> Option<RowIndex> {
        self.title_index.get(title).copied()
    }

    /// Get the movie at a row index
    pub fn movie(&self, index: RowIndex) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Get the full similarity row for a movie
    pub fn similarity_row(&self, index: RowIndex) -> Option<&[f32]> {
        self.similarity.row(index)
    }

    /// Iterate over all titles in row order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
