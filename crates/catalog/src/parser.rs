//! Parsers for the precomputed catalog artifacts.
//!
//! Both artifacts are line-oriented text files:
//! - movies.dat: catalogId::title, one movie per line; line order defines
//!   the row index
//! - similarity.dat: one matrix row per line, whitespace-separated scores
//!
//! Parse failures carry the file name, line number, and reason so a bad
//! artifact is diagnosable from the startup error alone.

use crate::error::{ArtifactLoadError, Result};
use crate::types::Movie;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|_| ArtifactLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(line?);
    }
    Ok(lines)
}

/// Parse a single movies.dat line
///
/// Format: catalogId::title, e.g. "603::The Matrix"
fn parse_movie_line(line: &str, line_no: usize) -> Result<Movie> {
    let (id, title) = line
        .split_once("::")
        .ok_or_else(|| ArtifactLoadError::Parse {
            file: "movies.dat".to_string(),
            line: line_no,
            reason: "Expected catalogId::title".to_string(),
        })?;

    let catalog_id = id.parse().map_err(|e| ArtifactLoadError::Parse {
        file: "movies.dat".to_string(),
        line: line_no,
        reason: format!("Invalid catalogId: {}", e),
    })?;

    if title.is_empty() {
        return Err(ArtifactLoadError::Parse {
            file: "movies.dat".to_string(),
            line: line_no,
            reason: "Empty title".to_string(),
        });
    }

    Ok(Movie {
        catalog_id,
        title: title.to_string(),
    })
}

/// Parse the movies.dat file
///
/// Empty lines are skipped; everything else must parse.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue; // Skip empty lines
        }
        movies.push(parse_movie_line(trimmed, line_no)?);
    }

    Ok(movies)
}

/// Parse a single similarity.dat row
fn parse_similarity_line(line: &str, line_no: usize) -> Result<Vec<f32>> {
    line.split_whitespace()
        .map(|s| {
            s.parse().map_err(|e| ArtifactLoadError::Parse {
                file: "similarity.dat".to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", s, e),
            })
        })
        .collect()
}

/// Parse the similarity.dat file into rows of scores
///
/// Squareness and the pairing against the movie table are validated later in
/// `CatalogStore::from_parts`; this only guarantees every score is a valid
/// float.
pub fn parse_similarity(path: &Path) -> Result<Vec<Vec<f32>>> {
    let lines = read_lines(path)?;
    let mut rows = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue; // Skip empty lines
        }
        rows.push(parse_similarity_line(trimmed, line_no)?);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_line() {
        let movie = parse_movie_line("603::The Matrix", 1).unwrap();
        assert_eq!(movie.catalog_id, 603);
        assert_eq!(movie.title, "The Matrix");
    }

    #[test]
    fn test_parse_movie_line_title_with_separator_content() {
        // Only the first "::" splits; the rest is title text
        let movie = parse_movie_line("1::Ichi: The Killer", 1).unwrap();
        assert_eq!(movie.title, "Ichi: The Killer");
    }

    #[test]
    fn test_parse_movie_line_missing_separator() {
        let err = parse_movie_line("just a title", 7).unwrap_err();
        assert!(matches!(
            err,
            ArtifactLoadError::Parse { line: 7, .. }
        ));
    }

    #[test]
    fn test_parse_movie_line_bad_id() {
        let err = parse_movie_line("abc::The Matrix", 3).unwrap_err();
        assert!(err.to_string().contains("Invalid catalogId"));
    }

    #[test]
    fn test_parse_movie_line_empty_title() {
        assert!(parse_movie_line("603::", 1).is_err());
    }

    #[test]
    fn test_parse_similarity_line() {
        let row = parse_similarity_line("1.0 0.5 0.25", 1).unwrap();
        assert_eq!(row, vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_parse_similarity_line_bad_score() {
        let err = parse_similarity_line("1.0 oops 0.25", 4).unwrap_err();
        assert!(matches!(
            err,
            ArtifactLoadError::Parse { line: 4, .. }
        ));
    }
}
