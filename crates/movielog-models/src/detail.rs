use serde::{Deserialize, Serialize};

/// Full movie data returned by a per-id lookup. Fetched fresh on every
/// detail view, never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// Free-text runtime as reported by the provider, e.g. "142 min".
    pub runtime: String,
    /// Aggregate external rating as a numeric string, e.g. "8.2".
    pub imdb_rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Leading integer of the runtime text ("142 min" -> 142).
    /// Returns None for missing or non-numeric runtimes ("N/A").
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime.split_whitespace().next()?.parse().ok()
    }

    /// Parsed external rating ("8.2" -> 8.2). None for "N/A" and friends.
    pub fn imdb_rating_value(&self) -> Option<f64> {
        self.imdb_rating.parse().ok()
    }
}
