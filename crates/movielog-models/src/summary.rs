use serde::{Deserialize, Serialize};

/// Minimal movie data returned by a search query.
/// Immutable once fetched; lives for one search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
}
