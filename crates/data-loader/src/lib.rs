//! # Data Loader Crate
//!
//! This crate handles loading and indexing the movie catalog and rating
//! events that feed the recommender.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, MovieCatalog)
//! - **parser**: Parse the CSV tables into Rust structs
//! - **catalog**: Build the catalog, compute stats, validate integrity
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! // Load the entire dataset
//! let catalog = MovieCatalog::load_from_files(Path::new("data"))?;
//!
//! // Query data
//! let movie = catalog.movie(1).unwrap();
//! let ratings = catalog.movie_ratings(1);
//!
//! println!("{} has {} ratings", movie.title, ratings.len());
//! ```
//!
//! ## Learning Goals
//!
//! This crate demonstrates several key Rust concepts:
//!
//! 1. **Ownership and Borrowing**: MovieCatalog owns the data, methods return references
//! 2. **Error Handling**: Using Result<T> and custom error types
//! 3. **Type Safety**: Type aliases (UserId, MovieId) prevent mixing up IDs
//! 4. **Collections**: Vec for ordered data, HashMap for efficient lookups
//! 5. **Serde**: Deserializing CSV records into typed structs
//! 6. **Parallel Processing**: Using Rayon for data-parallel operations

// Public modules
pub mod catalog;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    MovieCatalog,
    MovieStats,
};
