//! Server crate for the similarity-matrix movie recommender.
//!
//! This crate contains the orchestrator that ties ranking and poster
//! resolution together over one shared catalog store, plus the environment
//! configuration for the poster credential.

pub mod config;
pub mod orchestrator;

pub use config::Config;
pub use orchestrator::{RecommendationService, RecommendedMovie};
