//! # Recommender Crate
//!
//! This crate turns the loaded catalog and the fitted similarity index into
//! the user-facing operation: "name a movie, get similar movies back".
//!
//! ## Components
//!
//! ### Title Resolver
//! Case-insensitive substring lookup from free text to a movie id, first
//! match in catalog order.
//!
//! ### RecommendationEngine
//! The immutable fitted model (catalog + rating matrix + cosine index).
//! Fitted once at startup; each query resolves a title, pulls that movie's
//! rating vector, asks the index for its nearest columns, and maps them
//! back to titles.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use recommender::{RecommendOutcome, RecommendationEngine};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(MovieCatalog::load_from_files(Path::new("data"))?);
//! let engine = RecommendationEngine::fit(catalog)?;
//!
//! match engine.recommend("Toy Story", 5)? {
//!     RecommendOutcome::Recommendations(recs) => {
//!         for rec in recs {
//!             println!("{} ({:.3})", rec.title, rec.distance);
//!         }
//!     }
//!     RecommendOutcome::TitleNotFound { query } => {
//!         println!("No movie matching '{query}'");
//!     }
//!     RecommendOutcome::NoRatings { title } => {
//!         println!("'{title}' has no ratings yet");
//!     }
//! }
//! ```

// Public modules
pub mod engine;
pub mod resolver;

// Re-export the main types
pub use engine::{MovieRecommendation, RecommendOutcome, RecommendationEngine};
pub use resolver::resolve_title;
