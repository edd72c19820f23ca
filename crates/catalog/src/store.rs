//! Loading the CatalogStore from artifact files.
//!
//! This is a one-time startup load: both artifacts are parsed (in parallel,
//! since they are independent files), paired, and validated. There is no
//! retry and no reload; any failure here is fatal to the process.

use crate::error::Result;
use crate::parser;
use crate::types::CatalogStore;
use std::path::Path;
use tracing::info;

impl CatalogStore {
    /// Load the catalog from a directory containing movies.dat and
    /// similarity.dat.
    ///
    /// Steps:
    /// 1. Parse both artifact files in parallel
    /// 2. Validate the pair (square matrix, dimension == movie count)
    /// 3. Build the title -> row index map
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog artifacts from {:?}", data_dir);

        let movies_path = data_dir.join("movies.dat");
        let similarity_path = data_dir.join("similarity.dat");

        // The two artifacts are independent, so parse them in parallel
        let (movies, rows) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );

        let movies = movies?;
        let rows = rows?;

        info!(
            "Parsed {} movies and {} similarity rows",
            movies.len(),
            rows.len()
        );

        let store = CatalogStore::from_parts(movies, rows)?;

        info!("Catalog store built and validated ({} movies)", store.len());
        Ok(store)
    }
}
