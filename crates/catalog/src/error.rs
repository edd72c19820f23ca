//! Error types for the catalog crate.
//!
//! Everything here is fatal at startup: the store is loaded once from a
//! matched pair of precomputed artifacts, and a missing, corrupt, or
//! mismatched artifact means the process cannot serve requests.

use thiserror::Error;

/// Errors that can occur while loading the catalog artifacts
#[derive(Error, Debug)]
pub enum ArtifactLoadError {
    /// Artifact file could not be found or opened
    #[error("Failed to open artifact: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in an artifact couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// Movie table and similarity matrix were not loaded as a matched pair
    #[error("Artifact mismatch: {movies} movies but {rows} similarity rows")]
    DimensionMismatch { movies: usize, rows: usize },

    /// A similarity row has the wrong number of scores
    #[error("Similarity row {row} has {found} scores, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ArtifactLoadError>;
