//! # Recommender Crate
//!
//! Nearest-neighbor movie lookup over the precomputed similarity matrix.
//!
//! ## Components
//!
//! - **engine**: the ranking itself (resolve title, sort a similarity row,
//!   skip the self-entry, take top N)
//! - **error**: per-request error types (title not found, catalog too small)
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogStore;
//! use recommender::Recommender;
//! use std::sync::Arc;
//!
//! let store = Arc::new(CatalogStore::load_from_files("data".as_ref())?);
//! let recommender = Recommender::new(store);
//!
//! for rec in recommender.recommend_default("The Matrix")? {
//!     println!("{} (catalog id {}, score {:.3})", rec.title, rec.catalog_id, rec.score);
//! }
//! ```
//!
//! There is no training and no mutation: the recommender borrows the
//! immutable catalog through an `Arc` and every call is a pure lookup,
//! so concurrent callers need no coordination.

// Public modules
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use engine::{DEFAULT_LIMIT, Recommendation, Recommender};
pub use error::{RecommendError, Result};
