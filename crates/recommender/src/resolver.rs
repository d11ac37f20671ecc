//! Title resolution: free text -> movie id.
//!
//! The policy is deliberately simple: case-insensitive substring match,
//! first hit in catalog (file) order wins. Not best-match, not ranked by
//! edit distance. An empty query is a substring of every title and so
//! resolves to the first catalog row. Changing this policy (exact-match
//! first, ranked matches) would change which movie long-standing queries
//! resolve to, so it stays as is.

use data_loader::{MovieCatalog, MovieId};

/// Resolve a free-text query to a movie id.
///
/// Returns the id of the **first** movie in catalog order whose title
/// contains the query, ignoring case. `None` is a normal outcome ("no such
/// movie"), not an error.
pub fn resolve_title(catalog: &MovieCatalog, query: &str) -> Option<MovieId> {
    let query_lower = query.to_lowercase();
    catalog
        .movies()
        .iter()
        .find(|movie| movie.title.to_lowercase().contains(&query_lower))
        .map(|movie| movie.id)
}
