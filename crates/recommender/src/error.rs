//! Error types for the recommender crate.
//!
//! Unlike artifact loading, these are per-request errors: they are surfaced
//! to the caller and never crash the serving loop.

use thiserror::Error;

/// Errors that can occur while producing recommendations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecommendError {
    /// No movie in the catalog has this exact title (case-sensitive,
    /// no fuzzy matching)
    #[error("No movie titled '{0}' in the catalog")]
    TitleNotFound(String),

    /// Catalog is too small to recommend anything besides the queried
    /// movie itself
    #[error("Catalog has {have} movies; at least 2 are required")]
    InsufficientCatalog { have: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
