//! The user-movie rating matrix.
//!
//! Pivots the flat list of rating events into a dense 2D matrix:
//! - one row per distinct user (ascending user id)
//! - one column per distinct movie (ascending movie id)
//! - cell = the observed rating, or 0.0 when the user never rated the movie
//!
//! The zero fill means "no opinion" and "rated zero" are the same value.
//! That collapse biases cosine similarity toward co-rated movies and is
//! intentional, inherited behavior; do not special-case missing cells.
//!
//! Column order is load-bearing: `movie_ids` is the single source of truth
//! for which column belongs to which movie, and the nearest-neighbor index
//! later reports results as column positions that are mapped back through
//! it. Nothing else may define that mapping.
//!
//! Rust concepts you'll learn:
//! - Flat Vec<f32> storage with row-major indexing
//! - BTreeSet for sorted, de-duplicated key collection
//! - Returning Result from constructors

use crate::error::{Result, SimilarityError};
use data_loader::{MovieId, Rating, UserId};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Dense users x movies rating matrix plus the ordered index mappings
/// between matrix positions and domain ids.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    /// Row-major cell storage, len = n_users * n_movies
    values: Vec<f32>,
    /// Row position -> user id, ascending
    user_ids: Vec<UserId>,
    /// Column position -> movie id, ascending
    movie_ids: Vec<MovieId>,
    /// Movie id -> column position (inverse of `movie_ids`)
    column_index: HashMap<MovieId, usize>,
}

impl RatingMatrix {
    /// Pivot rating events into the dense matrix.
    ///
    /// Every (user, movie) pair must appear at most once; a duplicate pair
    /// is a fatal `DuplicateRating` error, matching the invariant of one
    /// cell per pair.
    pub fn from_ratings(ratings: &[Rating]) -> Result<Self> {
        // Collect the distinct ids in sorted order. The sorted orders ARE
        // the row/column orders for the lifetime of the matrix.
        let user_set: BTreeSet<UserId> = ratings.iter().map(|r| r.user_id).collect();
        let movie_set: BTreeSet<MovieId> = ratings.iter().map(|r| r.movie_id).collect();

        let user_ids: Vec<UserId> = user_set.into_iter().collect();
        let movie_ids: Vec<MovieId> = movie_set.into_iter().collect();

        let row_index: HashMap<UserId, usize> = user_ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row))
            .collect();
        let column_index: HashMap<MovieId, usize> = movie_ids
            .iter()
            .enumerate()
            .map(|(col, &id)| (id, col))
            .collect();

        let n_movies = movie_ids.len();
        let mut values = vec![0.0f32; user_ids.len() * n_movies];
        let mut filled = vec![false; values.len()];

        for rating in ratings {
            // Lookups can't fail: the index sets were built from `ratings`
            let row = row_index[&rating.user_id];
            let col = column_index[&rating.movie_id];
            let cell = row * n_movies + col;

            if filled[cell] {
                return Err(SimilarityError::DuplicateRating {
                    user_id: rating.user_id,
                    movie_id: rating.movie_id,
                });
            }
            filled[cell] = true;
            values[cell] = rating.rating;
        }

        debug!(
            "Built rating matrix: {} users x {} movies ({} observed cells)",
            user_ids.len(),
            n_movies,
            ratings.len()
        );

        Ok(Self {
            values,
            user_ids,
            movie_ids,
            column_index,
        })
    }

    /// Number of rows (distinct users)
    pub fn n_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of columns (distinct movies)
    pub fn n_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// Row position -> user id mapping, in row order
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Column position -> movie id mapping, in column order
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// Column position of a movie, if the movie has any ratings
    ///
    /// A cataloged movie nobody has rated has no column at all: the matrix
    /// is built purely from rating events.
    pub fn column_of(&self, movie_id: MovieId) -> Option<usize> {
        self.column_index.get(&movie_id).copied()
    }

    /// Movie id at a column position
    pub fn movie_id_at(&self, col: usize) -> Option<MovieId> {
        self.movie_ids.get(col).copied()
    }

    /// Cell value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.movie_ids.len() + col]
    }

    /// Extract one movie's column as an owned vector over all users.
    ///
    /// This is the per-movie rating profile the similarity index is built
    /// from (the matrix transpose, one row per movie).
    pub fn movie_vector(&self, col: usize) -> Option<Vec<f32>> {
        if col >= self.movie_ids.len() {
            return None;
        }
        Some(
            (0..self.user_ids.len())
                .map(|row| self.get(row, col))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: None,
        }
    }

    #[test]
    fn test_pivot_zero_fills_missing_cells() {
        // user 1 rated movies 10 and 20; user 2 rated only movie 20
        let ratings = vec![rating(1, 10, 4.0), rating(1, 20, 3.0), rating(2, 20, 5.0)];
        let matrix = RatingMatrix::from_ratings(&ratings).unwrap();

        assert_eq!(matrix.n_users(), 2);
        assert_eq!(matrix.n_movies(), 2);
        assert_eq!(matrix.get(0, 0), 4.0);
        assert_eq!(matrix.get(0, 1), 3.0);
        // user 2 never rated movie 10: zero fill
        assert_eq!(matrix.get(1, 0), 0.0);
        assert_eq!(matrix.get(1, 1), 5.0);
    }

    #[test]
    fn test_rows_and_columns_are_sorted_by_id() {
        // Events arrive in scrambled order; positions must still be sorted
        let ratings = vec![rating(7, 30, 1.0), rating(2, 10, 2.0), rating(5, 20, 3.0)];
        let matrix = RatingMatrix::from_ratings(&ratings).unwrap();

        assert_eq!(matrix.user_ids(), &[2, 5, 7]);
        assert_eq!(matrix.movie_ids(), &[10, 20, 30]);
    }

    #[test]
    fn test_column_mapping_round_trip() {
        let ratings = vec![rating(1, 10, 4.0), rating(1, 25, 3.0), rating(1, 99, 5.0)];
        let matrix = RatingMatrix::from_ratings(&ratings).unwrap();

        for &movie_id in matrix.movie_ids() {
            let col = matrix.column_of(movie_id).unwrap();
            assert_eq!(matrix.movie_id_at(col), Some(movie_id));
        }
    }

    #[test]
    fn test_duplicate_rating_pair_fails() {
        let ratings = vec![rating(1, 10, 4.0), rating(1, 10, 2.0)];
        let err = RatingMatrix::from_ratings(&ratings).unwrap_err();

        assert!(matches!(
            err,
            SimilarityError::DuplicateRating {
                user_id: 1,
                movie_id: 10
            }
        ));
    }

    #[test]
    fn test_movie_vector_is_the_column() {
        let ratings = vec![rating(1, 10, 4.0), rating(2, 10, 2.0), rating(2, 20, 5.0)];
        let matrix = RatingMatrix::from_ratings(&ratings).unwrap();

        let col = matrix.column_of(10).unwrap();
        assert_eq!(matrix.movie_vector(col).unwrap(), vec![4.0, 2.0]);
        assert_eq!(matrix.movie_vector(99), None);
    }

    #[test]
    fn test_empty_ratings_build_empty_matrix() {
        let matrix = RatingMatrix::from_ratings(&[]).unwrap();
        assert_eq!(matrix.n_users(), 0);
        assert_eq!(matrix.n_movies(), 0);
        assert_eq!(matrix.column_of(1), None);
    }
}
