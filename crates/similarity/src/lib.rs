//! # Similarity Crate
//!
//! This crate implements the numeric core of the recommender: the
//! user-movie rating matrix and the cosine nearest-neighbor index over it.
//!
//! ## Components
//!
//! ### RatingMatrix
//! Dense pivot of the rating events:
//! - rows = distinct users (ascending id), columns = distinct movies
//!   (ascending id)
//! - unobserved cells are 0.0
//! - owns the ordered column <-> movie id mapping the whole system relies on
//!
//! ### CosineKnnIndex
//! Brute-force cosine k-nearest-neighbor search:
//! - fitted once over the matrix transpose (one vector per movie)
//! - exhaustive scan per query, results ascending by distance
//! - immutable after fitting, no incremental updates
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{CosineKnnIndex, RatingMatrix};
//!
//! let matrix = RatingMatrix::from_ratings(catalog.ratings())?;
//! let index = CosineKnnIndex::fit(&matrix);
//!
//! let col = matrix.column_of(movie_id).unwrap();
//! let query = matrix.movie_vector(col).unwrap();
//! // +1 because the query movie is its own nearest neighbor
//! let neighbors = index.k_nearest(&query, 6)?;
//! ```
//!
//! ## Learning Goals
//!
//! 1. **Dense numeric layouts**: flat Vec<f32> slabs instead of nested Vecs
//! 2. **Ordering invariants**: one source of truth for position <-> id maps
//! 3. **Rayon**: data-parallel scans over immutable structures
//! 4. **Typed errors**: thiserror enums for the two fatal cases

// Public modules
pub mod error;
pub mod knn;
pub mod matrix;

// Re-export commonly used types
pub use error::{Result, SimilarityError};
pub use knn::{CosineKnnIndex, Neighbor, cosine_distance};
pub use matrix::RatingMatrix;
