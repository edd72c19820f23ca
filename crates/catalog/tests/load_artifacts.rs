//! Integration tests for loading the artifact pair from disk.
//!
//! Each test writes its own artifacts into a scratch directory under the
//! system temp dir, so no checked-in dataset is required.

use catalog::{ArtifactLoadError, CatalogStore};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("catalog-it-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn write_artifacts(dir: &PathBuf, movies: &str, similarity: &str) {
    fs::write(dir.join("movies.dat"), movies).expect("write movies.dat");
    fs::write(dir.join("similarity.dat"), similarity).expect("write similarity.dat");
}

#[test]
fn loads_a_matched_pair() {
    let dir = scratch_dir("valid");
    write_artifacts(
        &dir,
        "603::The Matrix\n78::Blade Runner\n348::Alien\n",
        "1.0 0.8 0.6\n0.8 1.0 0.7\n0.6 0.7 1.0\n",
    );

    let store = CatalogStore::load_from_files(&dir).expect("valid pair should load");

    assert_eq!(store.len(), 3);
    assert_eq!(store.resolve_title("Blade Runner"), Some(1));
    assert_eq!(store.movie(0).unwrap().catalog_id, 603);
    assert_eq!(store.similarity_row(2).unwrap(), &[0.6, 0.7, 1.0]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_artifact_is_fatal() {
    let dir = scratch_dir("missing");
    fs::write(dir.join("movies.dat"), "603::The Matrix\n").expect("write movies.dat");
    // No similarity.dat

    let err = CatalogStore::load_from_files(&dir).unwrap_err();
    assert!(matches!(err, ArtifactLoadError::FileNotFound { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn mismatched_pair_is_rejected() {
    let dir = scratch_dir("mismatch");
    write_artifacts(
        &dir,
        "603::The Matrix\n78::Blade Runner\n",
        "1.0 0.8 0.6\n0.8 1.0 0.7\n0.6 0.7 1.0\n",
    );

    let err = CatalogStore::load_from_files(&dir).unwrap_err();
    assert!(matches!(
        err,
        ArtifactLoadError::DimensionMismatch { movies: 2, rows: 3 }
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_score_reports_file_and_line() {
    let dir = scratch_dir("corrupt");
    write_artifacts(
        &dir,
        "603::The Matrix\n78::Blade Runner\n",
        "1.0 0.8\nnot-a-number 1.0\n",
    );

    let err = CatalogStore::load_from_files(&dir).unwrap_err();
    match err {
        ArtifactLoadError::Parse { file, line, .. } => {
            assert_eq!(file, "similarity.dat");
            assert_eq!(line, 2);
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }

    let _ = fs::remove_dir_all(&dir);
}
