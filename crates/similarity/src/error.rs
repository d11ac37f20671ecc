//! Error types for the similarity crate.

use data_loader::{MovieId, UserId};
use thiserror::Error;

/// Errors from matrix construction and index queries
///
/// There is nothing transient here: every variant is fatal to the operation
/// that produced it and is never retried.
#[derive(Error, Debug)]
pub enum SimilarityError {
    /// The same (user, movie) pair appeared twice in the rating events.
    /// The pivot requires exactly one cell per pair.
    #[error("Duplicate rating for user {user_id}, movie {movie_id}")]
    DuplicateRating { user_id: UserId, movie_id: MovieId },

    /// A query vector's dimensionality doesn't match the fitted index
    #[error("Query dimension mismatch: index expects {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SimilarityError>;
