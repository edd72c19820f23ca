//! # Catalog Crate
//!
//! This crate handles loading and indexing the precomputed recommendation
//! artifacts: the movie table and the dense similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, SimilarityMatrix, CatalogStore)
//! - **parser**: Parse the .dat artifacts into Rust structs
//! - **store**: Load, pair, and validate the artifacts at startup
//! - **error**: Error types for artifact loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogStore;
//! use std::path::Path;
//!
//! // One-time startup load; any failure here is fatal
//! let store = CatalogStore::load_from_files(Path::new("data"))?;
//!
//! let row = store.resolve_title("The Matrix").unwrap();
//! let scores = store.similarity_row(row).unwrap();
//!
//! println!("{} movies, row {} has {} scores", store.len(), row, scores.len());
//! ```
//!
//! The store is immutable after load. The row order of movies.dat and the
//! row/column order of similarity.dat must match exactly; `from_parts`
//! validates the dimensions so a mismatched pair fails fast instead of
//! silently producing wrong recommendations.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{ArtifactLoadError, Result};
pub use types::{
    // Type aliases
    CatalogId,
    RowIndex,
    // Core types
    Movie,
    SimilarityMatrix,
    CatalogStore,
};
