//! MovieCatalog building and validation logic.
//!
//! This module builds the MovieCatalog from parsed data:
//! - Parse the two CSV tables
//! - Build the id and per-movie rating indices
//! - Compute aggregate statistics (movie stats)
//! - Validate referential integrity
//!
//! Rust concepts you'll learn:
//! - Using Rayon for parallel processing
//! - Iterator methods (map, sum, etc.)
//! - Entry API for HashMap
//! - Borrowing and ownership in complex data structures

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

impl MovieCatalog {
    /// Load the full dataset from a directory containing `movies.csv` and
    /// `ratings.csv`.
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse both files (in parallel)
    /// 2. Build the catalog indices
    /// 3. Compute movie statistics
    /// 4. Validate data integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading rating dataset from {:?}", data_dir);

        // 1. Construct paths to the two CSV files
        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");

        // 2. Parse both files IN PARALLEL using Rayon
        // Rayon's `join` runs two closures in parallel
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );

        // Handle errors from parallel parsing
        // The ? operator works because both return Result<Vec<T>>
        let movies = movies?;
        let ratings = ratings?;

        info!("Loaded {} movies, {} ratings", movies.len(), ratings.len());

        // 3. Build the catalog
        let mut catalog = MovieCatalog::new();

        // Insert all movies (insertion order is the file order)
        for movie in movies {
            catalog.insert_movie(movie);
        }

        // Insert all ratings (this also populates movie_ratings)
        for rating in ratings {
            catalog.insert_rating(rating);
        }

        // 4. Compute movie statistics in parallel
        catalog.compute_movie_stats();

        // 5. Validate data integrity
        catalog.validate()?;

        info!("MovieCatalog successfully built and validated");
        Ok(catalog)
    }

    /// Compute aggregate statistics for all movies
    ///
    /// For each movie, calculate:
    /// - Average rating
    /// - Rating count
    pub fn compute_movie_stats(&mut self) {
        let movie_stats = self
            .movie_ratings
            .par_iter()
            .map(|(&movie_id, ratings)| {
                let rating_count = ratings.len() as u32;
                let avg_rating = if rating_count > 0 {
                    let total: f32 = ratings.iter().map(|r| r.rating).sum();
                    total / rating_count as f32
                } else {
                    0.0
                };

                (
                    movie_id,
                    MovieStats {
                        avg_rating,
                        rating_count,
                    },
                )
            })
            .collect();
        self.movie_stats = movie_stats;
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - All rating.movie_id references exist in the movie table
    /// - Ratings are in the MovieLens range (0.5 - 5.0)
    ///
    /// Returns Ok(()) if valid, Err on the first issue found. A malformed
    /// dataset aborts the whole run; there is no partial recovery.
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if self.movie(rating.movie_id).is_none() {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if rating.rating < 0.5 || rating.rating > 5.0 {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year: None,
        }
    }

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: None,
        }
    }

    #[test]
    fn test_movie_stats() {
        let mut catalog = MovieCatalog::new();
        catalog.insert_movie(movie(1, "Toy Story (1995)"));
        catalog.insert_rating(rating(1, 1, 4.0));
        catalog.insert_rating(rating(2, 1, 5.0));
        catalog.compute_movie_stats();

        let stats = catalog.movie_stats(1).unwrap();
        assert_eq!(stats.rating_count, 2);
        assert!((stats.avg_rating - 4.5).abs() < 1e-6);
    }

    #[test]
    fn test_validate_missing_movie_reference() {
        let mut catalog = MovieCatalog::new();
        catalog.insert_movie(movie(1, "Toy Story (1995)"));
        catalog.insert_rating(rating(1, 99, 4.0));

        let err = catalog.validate().unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingReference { id: 99, .. }
        ));
    }

    #[test]
    fn test_validate_rating_out_of_range() {
        let mut catalog = MovieCatalog::new();
        catalog.insert_movie(movie(1, "Toy Story (1995)"));
        catalog.insert_rating(rating(1, 1, 9.0));

        assert!(matches!(
            catalog.validate().unwrap_err(),
            DataLoadError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_load_dataset() {
        // This test requires an actual dataset
        // Place MovieLens-style CSVs in ../../../data/
        let data_dir = Path::new("../../../data");

        if data_dir.join("movies.csv").exists() {
            let catalog = MovieCatalog::load_from_files(data_dir).unwrap();
            let (movies, ratings) = catalog.counts();

            assert!(movies > 0);
            assert!(ratings > 0);
        }
    }
}
