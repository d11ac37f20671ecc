//! Core domain types for the rating dataset.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Structs with public fields
//! - Derive macros for common traits
//! - HashMap for efficient lookups

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Accepts both the `movie_id` and MovieLens `movieId` header spellings
    #[serde(rename = "movie_id", alias = "movieId")]
    pub id: MovieId,
    pub title: String,
    /// Year extracted from title (e.g., "Toy Story (1995)")
    ///
    /// Rust concept: `Option<T>` represents a value that may or may not exist
    /// - `Some(1995)` means we found a year
    /// - `None` means no year was found
    #[serde(default)]
    pub year: Option<u16>,
}

// =============================================================================
// Rating Type
// =============================================================================

/// Represents a single rating event from a user for a movie
///
/// Rust concepts:
/// - Small, copyable struct (all fields are Copy)
/// - serde aliases accept the MovieLens camelCase CSV headers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    #[serde(alias = "userId")]
    pub user_id: UserId,
    #[serde(alias = "movieId")]
    pub movie_id: MovieId,
    /// Rating value from 0.5 to 5.0
    pub rating: f32,
    /// Unix timestamp when the rating was made; present in MovieLens
    /// ratings.csv but unused by the recommender
    #[serde(default)]
    pub timestamp: Option<i64>,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for a movie
///
/// These are computed once when loading data for fast lookups later
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovieStats {
    pub avg_rating: f32,
    pub rating_count: u32,
}

// =============================================================================
// MovieCatalog - The Core In-Memory Store
// =============================================================================

/// Main data structure that holds the movie table, the rating events, and
/// the indices over them.
///
/// Movies are kept in **file order**: title resolution is defined as "first
/// substring match in catalog order", so the order rows were read in is part
/// of the contract, not an accident. `by_id` maps ids to positions in that
/// ordered list; when a movie id appears twice, the first row wins.
///
/// Rust concepts demonstrated:
/// - Vec for ordered storage, HashMap<K, V> for O(1) lookups
/// - Borrowing: methods return `&T` (references) not `T` (owned values)
#[derive(Debug)]
pub struct MovieCatalog {
    /// Movies in the order they appeared in movies.csv
    pub(crate) movies: Vec<Movie>,
    /// Movie id -> position in `movies`
    pub(crate) by_id: HashMap<MovieId, usize>,

    /// All rating events, in file order
    pub(crate) ratings: Vec<Rating>,
    /// All ratings received by each movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,

    // Precomputed statistics
    pub(crate) movie_stats: HashMap<MovieId, MovieStats>,
}

impl MovieCatalog {
    /// Creates a new, empty MovieCatalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            by_id: HashMap::new(),
            ratings: Vec::new(),
            movie_ratings: HashMap::new(),
            movie_stats: HashMap::new(),
        }
    }

    // Getters - Note: These return references (&T) not owned values (T)
    // This is a key Rust concept: borrowing vs. ownership

    /// Get a movie by ID
    ///
    /// Returns `Option<&Movie>`:
    /// - `Some(&movie)` if the movie exists (borrowing it)
    /// - `None` if it doesn't
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.by_id.get(&id).map(|&pos| &self.movies[pos])
    }

    /// All movies, in the order they were loaded
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All rating events, in the order they were loaded
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get all ratings for a movie
    ///
    /// Returns an empty slice if the movie has no ratings
    ///
    /// Rust concept: `&[T]` is a slice (view into an array/vector)
    pub fn movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get precomputed statistics for a movie
    pub fn movie_stats(&self, movie_id: MovieId) -> Option<&MovieStats> {
        self.movie_stats.get(&movie_id)
    }

    // Mutators - These are used during data loading
    // Note: They take `&mut self` (mutable reference) to modify the data

    /// Insert a movie into the catalog, preserving insertion order.
    /// If the id is already present the first row wins.
    pub fn insert_movie(&mut self, movie: Movie) {
        let pos = self.movies.len();
        self.by_id.entry(movie.id).or_insert(pos);
        self.movies.push(movie);
    }

    /// Insert a rating and update the per-movie index
    pub fn insert_rating(&mut self, rating: Rating) {
        self.movie_ratings
            .entry(rating.movie_id)
            .or_insert_with(Vec::new)
            .push(rating);
        self.ratings.push(rating);
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}

// Implement Default trait for convenience
impl Default for MovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}
