//! # Recommendation Engine
//!
//! This module ties the pieces together into one immutable, fitted model:
//! 1. Resolve the typed title to a movie id
//! 2. Locate that movie's column in the rating matrix
//! 3. Query the cosine index for the n+1 nearest columns
//! 4. Drop the first result (the query movie itself)
//! 5. Map the remaining columns back to titles, nearest first
//!
//! The engine owns the fitted state (catalog, matrix, index) explicitly
//! instead of keeping module-level globals, so independent instances can
//! coexist and tests can fit one over fixture data.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use data_loader::{MovieCatalog, MovieId};
use similarity::{CosineKnnIndex, RatingMatrix};

use crate::resolver::resolve_title;

/// Final recommendation returned to the user
#[derive(Debug, Clone)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub year: Option<u16>,
    /// Raw cosine distance from the query movie (lower = more similar)
    pub distance: f32,
    pub avg_rating: f32,
    pub rating_count: u32,
}

/// Result of a recommendation request.
///
/// Only load-time problems are errors; everything a user can type maps to
/// one of these ordinary outcomes and a human-readable message, never a
/// crash.
#[derive(Debug, Clone)]
pub enum RecommendOutcome {
    /// Neighbors found, nearest first; may hold fewer than the requested
    /// count when the matrix is small
    Recommendations(Vec<MovieRecommendation>),
    /// No catalog title contains the query string
    TitleNotFound { query: String },
    /// The title resolved, but nobody has rated the movie, so it has no
    /// column in the rating matrix to compare against
    NoRatings { title: String },
}

/// The fitted model: catalog + rating matrix + cosine index.
///
/// Built once at startup and read-only afterwards. Rebuilding from a changed
/// catalog means fitting a new engine; nothing is updated in place.
pub struct RecommendationEngine {
    catalog: Arc<MovieCatalog>,
    matrix: RatingMatrix,
    index: CosineKnnIndex,
}

impl RecommendationEngine {
    /// Fit the engine over a loaded catalog.
    ///
    /// Pivots the rating events into the matrix and fits the cosine index
    /// over its movie vectors. Fails on a malformed rating table (duplicate
    /// (user, movie) pairs); that is a startup error, not a per-query one.
    pub fn fit(catalog: Arc<MovieCatalog>) -> Result<Self> {
        let start = Instant::now();

        let matrix = RatingMatrix::from_ratings(catalog.ratings())
            .context("Failed to build the rating matrix")?;
        let index = CosineKnnIndex::fit(&matrix);

        info!(
            "Fitted recommendation engine over {} users x {} movies in {:?}",
            matrix.n_users(),
            matrix.n_movies(),
            start.elapsed()
        );

        Ok(Self {
            catalog,
            matrix,
            index,
        })
    }

    /// The catalog this engine was fitted over
    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    /// Recommend up to `n` movies similar to the one named by `title`.
    ///
    /// The index holds the query movie itself, so it asks for n+1 neighbors
    /// and drops the first (self, distance ~0) result. When the matrix has
    /// fewer than n+1 movies the list is simply shorter; no padding, no
    /// error.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, n: usize) -> Result<RecommendOutcome> {
        let Some(movie_id) = resolve_title(&self.catalog, title) else {
            return Ok(RecommendOutcome::TitleNotFound {
                query: title.to_string(),
            });
        };

        // The matrix only has columns for rated movies
        let Some(col) = self.matrix.column_of(movie_id) else {
            let resolved = self
                .catalog
                .movie(movie_id)
                .map(|m| m.title.clone())
                .unwrap_or_else(|| title.to_string());
            return Ok(RecommendOutcome::NoRatings { title: resolved });
        };

        let query = self
            .matrix
            .movie_vector(col)
            .context("Resolved column missing from the rating matrix")?;

        let neighbors = self.index.k_nearest(&query, n + 1)?;

        let recommendations = neighbors
            .into_iter()
            .skip(1) // the query movie is its own nearest neighbor
            .filter_map(|neighbor| {
                let movie_id = self.matrix.movie_id_at(neighbor.index)?;
                let movie = self.catalog.movie(movie_id)?;
                let stats = self.catalog.movie_stats(movie_id);
                Some(MovieRecommendation {
                    movie_id,
                    title: movie.title.clone(),
                    year: movie.year,
                    distance: neighbor.distance,
                    avg_rating: stats.map(|s| s.avg_rating).unwrap_or(0.0),
                    rating_count: stats.map(|s| s.rating_count).unwrap_or(0),
                })
            })
            .collect();

        Ok(RecommendOutcome::Recommendations(recommendations))
    }
}
