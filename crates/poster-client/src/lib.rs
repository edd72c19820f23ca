//! Poster resolution client for the TMDB catalog API.
//!
//! This crate provides the poster lookup boundary consumed by the
//! orchestrator. It handles:
//! - Fetching movie details from TMDB by catalog id
//! - Extracting the poster path and building a displayable image URL
//! - Degrading to placeholder URLs instead of surfacing errors
//! - Caching lookups for the process lifetime
//!
//! `fetch_poster` never fails: the recommendation itself must not depend on
//! poster availability. Two distinct placeholders keep "no credential
//! configured" observable separately from "lookup failed or no artwork".

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use catalog::CatalogId;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Returned for every lookup when no API credential is configured.
/// Degraded mode, not an error: the process still serves recommendations.
pub const NO_CREDENTIAL_PLACEHOLDER: &str =
    "https://dummyimage.com/500x750/455c73/ffffff&text=No+API+Key";

/// Returned when a lookup fails in transit, decodes badly, or the movie
/// simply has no artwork
pub const LOOKUP_FAILED_PLACEHOLDER: &str =
    "https://dummyimage.com/500x750/455c73/ffffff&text=Error";

/// Configuration for the poster client
#[derive(Debug, Clone)]
pub struct PosterConfig {
    /// TMDB API key; `None` puts the client in degraded placeholder mode
    pub api_key: Option<String>,
    /// TMDB API base URL
    pub api_url: String,
    /// Base URL that poster paths are appended to
    pub image_base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Errors recovered locally inside the client. Never propagated to callers;
/// every variant resolves to `LOOKUP_FAILED_PLACEHOLDER`.
#[derive(Error, Debug)]
enum PosterLookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Movie has no poster_path")]
    MissingArtwork,
}

/// Subset of the TMDB movie-details response we care about
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

/// Client for resolving catalog ids to poster image URLs.
///
/// Cheap to clone: the HTTP connection pool and the lookup cache are shared
/// across clones, so spawned tasks fetching posters in parallel hit one cache.
#[derive(Clone)]
pub struct PosterClient {
    http_client: reqwest::Client,
    config: PosterConfig,
    /// Process-lifetime cache of catalog_id -> poster URL. Catalog data is
    /// immutable for the process lifetime, so entries are never invalidated.
    cache: Arc<Mutex<HashMap<CatalogId, String>>>,
}

impl PosterClient {
    /// Create a client from configuration.
    ///
    /// Building the underlying HTTP client applies the per-request timeout;
    /// no connection is made here.
    pub fn new(config: PosterConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Building HTTP client for poster lookups")?;

        Ok(Self {
            http_client,
            config,
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Whether a credential is configured (placeholder mode otherwise)
    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Resolve a catalog id to a displayable poster URL.
    ///
    /// Always returns a non-empty URL:
    /// - no credential configured -> `NO_CREDENTIAL_PLACEHOLDER`
    /// - lookup failed or no artwork -> `LOOKUP_FAILED_PLACEHOLDER`
    /// - otherwise the full TMDB image URL
    pub async fn fetch_poster(&self, catalog_id: CatalogId) -> String {
        let Some(api_key) = self.config.api_key.clone() else {
            return NO_CREDENTIAL_PLACEHOLDER.to_string();
        };

        if let Some(url) = self.cached(catalog_id) {
            debug!(catalog_id, "Poster cache hit");
            return url;
        }

        let url = match self.lookup(catalog_id, &api_key).await {
            Ok(url) => url,
            Err(e) => {
                warn!(catalog_id, error = %e, "Poster lookup failed, using placeholder");
                LOOKUP_FAILED_PLACEHOLDER.to_string()
            }
        };

        // Failed lookups are cached too: the catalog is static, so retrying
        // the same id within one process would just repeat the failure.
        self.cache
            .lock()
            .expect("poster cache lock poisoned")
            .insert(catalog_id, url.clone());

        url
    }

    fn cached(&self, catalog_id: CatalogId) -> Option<String> {
        self.cache
            .lock()
            .expect("poster cache lock poisoned")
            .get(&catalog_id)
            .cloned()
    }

    /// One GET against the TMDB movie-details endpoint
    async fn lookup(
        &self,
        catalog_id: CatalogId,
        api_key: &str,
    ) -> std::result::Result<String, PosterLookupError> {
        let url = format!("{}/movie/{}", self.config.api_url, catalog_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PosterLookupError::Status(response.status()));
        }

        let details: MovieDetails = response.json().await?;

        let poster_path = details
            .poster_path
            .ok_or(PosterLookupError::MissingArtwork)?;

        debug!(catalog_id, poster_path = %poster_path, "Poster resolved");
        Ok(self.image_url(&poster_path))
    }

    /// Join a TMDB poster path onto the image base URL
    fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.config.image_base_url, poster_path)
    }
}
