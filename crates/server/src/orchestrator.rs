//! # Recommendation Orchestrator
//!
//! Coordinates a full recommendation request:
//! 1. Rank similar movies via the similarity matrix (in-memory, no blocking)
//! 2. Resolve a poster URL for each result from the TMDB API
//! 3. Return results in rank order
//!
//! Poster fetches are spawned as independent tasks: one slow or failed
//! lookup never delays, aborts, or fails the others, and never fails the
//! recommendation itself.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use catalog::{CatalogId, CatalogStore};
use poster_client::{LOOKUP_FAILED_PLACEHOLDER, PosterClient, PosterConfig};
use recommender::{Recommendation, RecommendError, Recommender};

use crate::config::Config;

/// Final recommendation returned to the caller, with artwork resolved
#[derive(Debug, Clone)]
pub struct RecommendedMovie {
    pub title: String,
    pub catalog_id: CatalogId,
    pub score: f32,
    pub poster_url: String,
}

/// Ties the recommender and the poster client together over one shared
/// catalog store.
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<CatalogStore>,
    recommender: Recommender,
    posters: PosterClient,
}

impl RecommendationService {
    /// Create a service from application configuration
    pub fn new(store: Arc<CatalogStore>, config: &Config) -> Result<Self> {
        Self::with_poster_config(store, config.poster_config())
    }

    /// Create a service with an explicit poster configuration
    pub fn with_poster_config(
        store: Arc<CatalogStore>,
        poster_config: PosterConfig,
    ) -> Result<Self> {
        let recommender = Recommender::new(store.clone());
        let posters = PosterClient::new(poster_config)?;

        if !posters.has_credential() {
            warn!("No TMDB API key configured; posters degrade to placeholders");
        }

        Ok(Self {
            store,
            recommender,
            posters,
        })
    }

    /// The shared catalog store (for title listing and search)
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Rank only, no network
    pub fn recommend(
        &self,
        title: &str,
        limit: usize,
    ) -> std::result::Result<Vec<Recommendation>, RecommendError> {
        self.recommender.recommend(title, limit)
    }

    /// Rank, then resolve a poster URL for every result.
    ///
    /// The only error is a ranking error (unknown title, catalog too small);
    /// poster failures degrade to placeholders per result. Output order
    /// matches rank order.
    pub async fn recommend_with_posters(
        &self,
        title: &str,
        limit: usize,
    ) -> std::result::Result<Vec<RecommendedMovie>, RecommendError> {
        let start = Instant::now();

        let ranked = self.recommender.recommend(title, limit)?;
        info!("Ranked {} movies for '{}'", ranked.len(), title);

        // One task per poster; each fetch blocks at most its own timeout
        let mut handles = Vec::with_capacity(ranked.len());
        for rec in &ranked {
            let posters = self.posters.clone();
            let catalog_id = rec.catalog_id;
            handles.push(tokio::spawn(
                async move { posters.fetch_poster(catalog_id).await },
            ));
        }

        let mut results = Vec::with_capacity(ranked.len());
        for (rec, handle) in ranked.into_iter().zip(handles) {
            let poster_url = match handle.await {
                Ok(url) => url,
                Err(e) => {
                    warn!(
                        catalog_id = rec.catalog_id,
                        error = %e,
                        "Poster task panicked, using placeholder"
                    );
                    LOOKUP_FAILED_PLACEHOLDER.to_string()
                }
            };
            results.push(RecommendedMovie {
                title: rec.title,
                catalog_id: rec.catalog_id,
                score: rec.score,
                poster_url,
            });
        }

        info!(
            "Resolved {} recommendations with posters for '{}' in {:.2?}",
            results.len(),
            title,
            start.elapsed()
        );
        Ok(results)
    }
}
