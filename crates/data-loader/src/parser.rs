//! Parser for the rating dataset CSV files.
//!
//! This module handles parsing the two tables:
//! - movies.csv: movie_id,title
//! - ratings.csv: user_id,movie_id,rating[,timestamp]
//!
//! The MovieLens header spellings (movieId, userId) are accepted as well,
//! and extra columns such as `genres` are ignored. Titles may contain commas
//! and are quoted in the source files, so parsing goes through the `csv`
//! crate rather than a hand-rolled split.
//!
//! Rust concepts you'll learn here:
//! - Deserializing records with serde
//! - Error handling with the `?` operator
//! - Generic functions over `io::Read` (parse from files or from memory)

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Open a file, mapping a missing file to a `FileNotFound` error with the
/// offending path instead of a bare I/O error.
fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            DataLoadError::IoError(e)
        }
    })
}

/// Best-effort line number for a csv error, for the ParseError context
fn error_line(err: &csv::Error, fallback_record: usize) -> usize {
    err.position()
        .map(|p| p.line() as usize)
        // +2: one for the header row, one because records are 0-indexed
        .unwrap_or(fallback_record + 2)
}

/// Parse the movies table
///
/// Format: movie_id,title (header row required)
///
/// The title often includes the release year in parentheses:
/// "Toy Story (1995)". The year is extracted into `Movie::year`.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = open_file(path)?;
    parse_movies_from_reader(file, &path.display().to_string())
}

/// Parse movies from any reader (used by tests with in-memory CSV)
pub fn parse_movies_from_reader<R: Read>(reader: R, file_label: &str) -> Result<Vec<Movie>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut movies = Vec::new();

    for (record_no, record) in csv_reader.deserialize().enumerate() {
        let mut movie: Movie = record.map_err(|e| DataLoadError::ParseError {
            file: file_label.to_string(),
            line: error_line(&e, record_no),
            reason: e.to_string(),
        })?;
        movie.year = extract_year_from_title(&movie.title);
        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the ratings table
///
/// Format: user_id,movie_id,rating[,timestamp] (header row required)
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = open_file(path)?;
    parse_ratings_from_reader(file, &path.display().to_string())
}

/// Parse ratings from any reader (used by tests with in-memory CSV)
pub fn parse_ratings_from_reader<R: Read>(reader: R, file_label: &str) -> Result<Vec<Rating>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut ratings = Vec::new();

    for (record_no, record) in csv_reader.deserialize().enumerate() {
        let rating: Rating = record.map_err(|e| DataLoadError::ParseError {
            file: file_label.to_string(),
            line: error_line(&e, record_no),
            reason: e.to_string(),
        })?;
        ratings.push(rating);
    }

    Ok(ratings)
}

/// Extract year from movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    // Extract year from parentheses at end of title
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        let year_str = &title[start + 1..end];
        if let Ok(year) = year_str.parse::<u16>() {
            return Some(year);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year_from_title("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year_from_title("Movie Title"), None);
    }

    #[test]
    fn test_parse_movies() {
        let csv = "movie_id,title\n1,Toy Story (1995)\n2,\"Postman, The (1997)\"\n";
        let movies = parse_movies_from_reader(Cursor::new(csv), "movies.csv").unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title, "Toy Story (1995)");
        assert_eq!(movies[0].year, Some(1995));
        // Quoted title with an embedded comma stays intact
        assert_eq!(movies[1].title, "Postman, The (1997)");
    }

    #[test]
    fn test_parse_movies_movielens_headers() {
        // MovieLens spells the header movieId and carries a genres column
        let csv = "movieId,title,genres\n1,Toy Story (1995),Animation|Comedy\n";
        let movies = parse_movies_from_reader(Cursor::new(csv), "movies.csv").unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);
    }

    #[test]
    fn test_parse_ratings() {
        let csv = "user_id,movie_id,rating\n1,1,4.0\n1,2,3.5\n2,1,5.0\n";
        let ratings = parse_ratings_from_reader(Cursor::new(csv), "ratings.csv").unwrap();

        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[0].user_id, 1);
        assert_eq!(ratings[0].movie_id, 1);
        assert_eq!(ratings[0].rating, 4.0);
        assert_eq!(ratings[0].timestamp, None);
    }

    #[test]
    fn test_parse_ratings_with_timestamp() {
        let csv = "userId,movieId,rating,timestamp\n1,1,4.0,964982703\n";
        let ratings = parse_ratings_from_reader(Cursor::new(csv), "ratings.csv").unwrap();

        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].timestamp, Some(964982703));
    }

    #[test]
    fn test_parse_malformed_rating_is_fatal() {
        let csv = "user_id,movie_id,rating\n1,1,not-a-number\n";
        let err = parse_ratings_from_reader(Cursor::new(csv), "ratings.csv").unwrap_err();

        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, "ratings.csv");
                assert_eq!(line, 2);
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}
