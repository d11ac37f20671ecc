//! Brute-force cosine nearest-neighbor index over movie rating vectors.
//!
//! The index is fitted once over the transpose of the rating matrix (one
//! vector per movie, spanning all users) and is immutable afterwards. A
//! query is an exhaustive scan: every stored vector gets a cosine distance,
//! the results are sorted ascending, and the closest k survive. No
//! approximate structure, no pruning; the catalog sizes this serves make a
//! full scan the right trade.
//!
//! Because the index is queried with vectors taken from the same matrix it
//! was built over, the query movie shows up in its own results at distance
//! ~0. Callers that want "neighbors other than me" ask for k+1 and drop the
//! first result.
//!
//! Rust concepts you'll learn:
//! - Flat slab storage with computed offsets
//! - Parallel iterators (Rayon) over index ranges
//! - Sorting with partial_cmp on floats

use crate::error::{Result, SimilarityError};
use crate::matrix::RatingMatrix;
use rayon::prelude::*;
use tracing::debug;

/// One query result: a column position in the rating matrix and its cosine
/// distance from the query vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f32,
}

/// Exhaustive cosine-distance nearest-neighbor index.
///
/// Immutable once fitted; a changed rating matrix requires a fresh fit,
/// there is no incremental update path.
#[derive(Debug, Clone)]
pub struct CosineKnnIndex {
    /// All vectors back to back, len = count * dim
    vectors: Vec<f32>,
    /// Dimensionality of every vector (= number of users)
    dim: usize,
    /// Number of stored vectors (= number of movies)
    count: usize,
}

impl CosineKnnIndex {
    /// Fit the index over the movie vectors of a rating matrix.
    pub fn fit(matrix: &RatingMatrix) -> Self {
        let dim = matrix.n_users();
        let count = matrix.n_movies();

        let mut vectors = Vec::with_capacity(count * dim);
        for col in 0..count {
            for row in 0..dim {
                vectors.push(matrix.get(row, col));
            }
        }

        debug!("Fitted cosine index: {} vectors of dim {}", count, dim);

        Self {
            vectors,
            dim,
            count,
        }
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Dimensionality the index expects of query vectors
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Vector stored at position `i`
    fn vector(&self, i: usize) -> &[f32] {
        &self.vectors[i * self.dim..(i + 1) * self.dim]
    }

    /// Find the k nearest stored vectors to `query`, ascending by cosine
    /// distance.
    ///
    /// Returns min(k, len) neighbors. Equal distances are broken by column
    /// index so results are deterministic. The only failure mode is a query
    /// whose dimensionality doesn't match the index; that is fatal to the
    /// query and never retried.
    pub fn k_nearest(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dim {
            return Err(SimilarityError::DimensionMismatch {
                expected: self.dim,
                found: query.len(),
            });
        }

        // Exhaustive scan, parallelized across the stored vectors
        let mut neighbors: Vec<Neighbor> = (0..self.count)
            .into_par_iter()
            .map(|i| Neighbor {
                index: i,
                distance: cosine_distance(query, self.vector(i)),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

/// Cosine distance between two equal-length vectors: 1 - cos(angle).
///
/// A zero vector has no direction, so its distance to anything is defined
/// as 1.0. The result is clamped at >= 0 against floating-point drift.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    (1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;

    fn rating(user_id: u32, movie_id: u32, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: None,
        }
    }

    /// Three movies over two users: movies 10 and 20 are rated identically
    /// (parallel vectors), movie 30 only overlaps partially.
    fn fixture_matrix() -> RatingMatrix {
        let ratings = vec![
            rating(1, 10, 4.0),
            rating(2, 10, 2.0),
            rating(1, 20, 4.0),
            rating(2, 20, 2.0),
            rating(1, 30, 5.0),
        ];
        RatingMatrix::from_ratings(&ratings).unwrap()
    }

    #[test]
    fn test_cosine_distance_basics() {
        // Parallel vectors: distance 0
        assert!(cosine_distance(&[1.0, 2.0], &[2.0, 4.0]) < 1e-6);
        // Orthogonal vectors: distance 1
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        // Zero vector: distance defined as 1
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_query_movie_is_its_own_nearest_neighbor() {
        let matrix = fixture_matrix();
        let index = CosineKnnIndex::fit(&matrix);

        let col = matrix.column_of(10).unwrap();
        let query = matrix.movie_vector(col).unwrap();
        let neighbors = index.k_nearest(&query, 3).unwrap();

        assert_eq!(neighbors.len(), 3);
        // Self comes back first at ~zero distance (tie with the identical
        // movie 20 broken by column index)
        assert_eq!(neighbors[0].index, col);
        assert!(neighbors[0].distance < 1e-6);
    }

    #[test]
    fn test_distances_are_ascending() {
        let matrix = fixture_matrix();
        let index = CosineKnnIndex::fit(&matrix);

        let query = matrix.movie_vector(matrix.column_of(30).unwrap()).unwrap();
        let neighbors = index.k_nearest(&query, 3).unwrap();

        for pair in neighbors.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_k_larger_than_index_returns_all() {
        let matrix = fixture_matrix();
        let index = CosineKnnIndex::fit(&matrix);

        let query = matrix.movie_vector(0).unwrap();
        let neighbors = index.k_nearest(&query, 50).unwrap();

        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let matrix = fixture_matrix();
        let index = CosineKnnIndex::fit(&matrix);

        let err = index.k_nearest(&[1.0], 3).unwrap_err();
        assert!(matches!(
            err,
            SimilarityError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        ));
    }
}
