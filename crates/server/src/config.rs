//! Application configuration loaded from environment variables.
//!
//! Only the credential matters for behavior: a missing TMDB_API_KEY puts the
//! poster client in degraded placeholder mode instead of failing startup.

use poster_client::PosterConfig;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; absent means degraded mode (placeholder posters),
    /// never a startup failure
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL poster paths are appended to
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Per-request poster lookup timeout in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Poster client configuration derived from this config
    pub fn poster_config(&self) -> PosterConfig {
        PosterConfig {
            api_key: self.tmdb_api_key.clone(),
            api_url: self.tmdb_api_url.clone(),
            image_base_url: self.tmdb_image_base_url.clone(),
            timeout: Duration::from_secs(self.poster_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_image_base_url: default_tmdb_image_base_url(),
            poster_timeout_secs: default_poster_timeout_secs(),
        }
    }
}
