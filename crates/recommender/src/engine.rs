//! Similarity-row ranking.
//!
//! The whole algorithm is one nearest-neighbor lookup against the precomputed
//! matrix:
//! 1. Resolve the title to its row index (O(1) via the catalog's title map)
//! 2. Enumerate the similarity row as (row_index, score) pairs
//! 3. Stable sort descending by score; ties keep ascending row-index order
//! 4. Skip rank 0 (the queried movie itself, diagonal-maximal by convention)
//!    and take the next `limit` entries

use catalog::{CatalogId, CatalogStore, RowIndex};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::{RecommendError, Result};

/// Default number of recommendations returned
pub const DEFAULT_LIMIT: usize = 10;

/// A single ranked recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub catalog_id: CatalogId,
    pub score: f32,
}

/// Ranks movies against a queried title using the precomputed similarity
/// matrix.
#[derive(Clone)]
pub struct Recommender {
    /// Shared reference to the catalog (read-only, so no locking needed)
    store: Arc<CatalogStore>,
}

impl Recommender {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Produce the top `limit` recommendations for an exact title.
    ///
    /// Output is deterministic for an unchanged catalog: descending by score,
    /// ties broken by ascending row index (stable sort preserves enumeration
    /// order). Returns fewer than `limit` entries when the catalog has fewer
    /// than `limit + 1` movies.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        if self.store.len() < 2 {
            return Err(RecommendError::InsufficientCatalog {
                have: self.store.len(),
            });
        }

        let row_index = self
            .store
            .resolve_title(title)
            .ok_or_else(|| RecommendError::TitleNotFound(title.to_string()))?;

        let scores = self
            .store
            .similarity_row(row_index)
            .expect("title index resolves within validated matrix bounds");

        let mut ranked: Vec<(RowIndex, f32)> = scores.iter().copied().enumerate().collect();
        // Stable descending sort: equal scores keep ascending row-index order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        // The self-entry is skipped positionally, not by identity: the
        // diagonal is maximal by construction, so the queried movie occupies
        // rank 0. If the data breaks that assumption (e.g. a duplicate top
        // score), the skip can leak the queried movie into the results.
        if ranked.first().map(|&(idx, _)| idx) != Some(row_index) {
            warn!(
                title,
                row_index, "rank-0 entry is not the queried movie; similarity diagonal is not maximal"
            );
        }

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .skip(1)
            .take(limit)
            .filter_map(|(idx, score)| {
                let movie = self.store.movie(idx)?;
                Some(Recommendation {
                    title: movie.title.clone(),
                    catalog_id: movie.catalog_id,
                    score,
                })
            })
            .collect();

        debug!(
            "Ranked {} movies for '{}', returning {}",
            self.store.len(),
            title,
            recommendations.len()
        );

        Ok(recommendations)
    }

    /// `recommend` with the default limit of 10
    pub fn recommend_default(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend(title, DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Movie;

    fn movie(catalog_id: u32, title: &str) -> Movie {
        Movie {
            catalog_id,
            title: title.to_string(),
        }
    }

    fn three_movie_store() -> Arc<CatalogStore> {
        // Queried movie sits at row 1 with self-score 1.0
        Arc::new(
            CatalogStore::from_parts(
                vec![movie(10, "Alien"), movie(20, "Aliens"), movie(30, "Gremlins")],
                vec![
                    vec![1.0, 0.9, 0.3],
                    vec![0.9, 1.0, 0.5],
                    vec![0.3, 0.5, 1.0],
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_recommend_orders_by_descending_score() {
        let recommender = Recommender::new(three_movie_store());

        // Row for "Aliens" is [0.9, 1.0, 0.5]: self at rank 0,
        // then Alien (0.9), then Gremlins (0.5)
        let recs = recommender.recommend("Aliens", 2).unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "Alien");
        assert_eq!(recs[0].catalog_id, 10);
        assert_eq!(recs[0].score, 0.9);
        assert_eq!(recs[1].title, "Gremlins");
        assert_eq!(recs[1].catalog_id, 30);
        assert_eq!(recs[1].score, 0.5);
    }

    #[test]
    fn test_recommend_excludes_queried_movie() {
        let recommender = Recommender::new(three_movie_store());

        let recs = recommender.recommend("Aliens", 10).unwrap();

        assert!(recs.iter().all(|r| r.title != "Aliens"));
        // Only 2 other movies exist, so fewer than limit come back
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let recommender = Recommender::new(three_movie_store());

        let first = recommender.recommend("Alien", 2).unwrap();
        let second = recommender.recommend("Alien", 2).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_recommend_ties_break_by_ascending_row_index() {
        // Rows 1, 2, 3 all score 0.7 against row 0
        let store = Arc::new(
            CatalogStore::from_parts(
                vec![
                    movie(1, "A"),
                    movie(2, "B"),
                    movie(3, "C"),
                    movie(4, "D"),
                ],
                vec![
                    vec![1.0, 0.7, 0.7, 0.7],
                    vec![0.7, 1.0, 0.0, 0.0],
                    vec![0.7, 0.0, 1.0, 0.0],
                    vec![0.7, 0.0, 0.0, 1.0],
                ],
            )
            .unwrap(),
        );
        let recommender = Recommender::new(store);

        let recs = recommender.recommend("A", 3).unwrap();

        let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_recommend_unknown_title() {
        let recommender = Recommender::new(three_movie_store());

        let err = recommender.recommend("Alien 3", 10).unwrap_err();
        assert_eq!(err, RecommendError::TitleNotFound("Alien 3".to_string()));
    }

    #[test]
    fn test_recommend_title_match_is_case_sensitive() {
        let recommender = Recommender::new(three_movie_store());

        assert!(matches!(
            recommender.recommend("alien", 10),
            Err(RecommendError::TitleNotFound(_))
        ));
    }

    #[test]
    fn test_recommend_single_movie_catalog() {
        let store = Arc::new(
            CatalogStore::from_parts(vec![movie(10, "Alien")], vec![vec![1.0]]).unwrap(),
        );
        let recommender = Recommender::new(store);

        let err = recommender.recommend("Alien", 10).unwrap_err();
        assert_eq!(err, RecommendError::InsufficientCatalog { have: 1 });
    }

    #[test]
    fn test_recommend_default_limit_is_ten() {
        // 12 movies: row 0 queried, 11 others, default limit caps at 10
        let n = 12;
        let movies: Vec<Movie> = (0..n)
            .map(|i| movie(i as u32 + 1, &format!("Movie {}", i)))
            .collect();
        let rows: Vec<Vec<f32>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 1.0 } else { 1.0 / (j as f32 + 2.0) })
                    .collect()
            })
            .collect();
        let store = Arc::new(CatalogStore::from_parts(movies, rows).unwrap());
        let recommender = Recommender::new(store);

        let recs = recommender.recommend_default("Movie 0").unwrap();
        assert_eq!(recs.len(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_recommend_handles_nan_scores() {
        // NaN must not panic the comparator; everything else still ranks
        let store = Arc::new(
            CatalogStore::from_parts(
                vec![movie(1, "A"), movie(2, "B"), movie(3, "C")],
                vec![
                    vec![1.0, f32::NAN, 0.5],
                    vec![f32::NAN, 1.0, 0.0],
                    vec![0.5, 0.0, 1.0],
                ],
            )
            .unwrap(),
        );
        let recommender = Recommender::new(store);

        let recs = recommender.recommend("A", 2).unwrap();
        assert_eq!(recs.len(), 2);
    }
}
