use serde::{Deserialize, Serialize};

use crate::detail::MovieDetail;

/// A user's persisted rating of a movie they marked as watched.
///
/// Created once when the user commits a rating and immutable thereafter;
/// removable by id. Wire field names are pinned so previously stored data
/// stays readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// Runtime in whole minutes, parsed from the detail record.
    pub runtime: Option<u32>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<f64>,
    /// User-assigned rating, 1-10, or absent if never rated.
    #[serde(rename = "userRating", skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
    /// How many times the user changed their rating before committing.
    /// UX telemetry only; carried as an explicit field so the record
    /// stays serializable and the storage format stays stable.
    #[serde(rename = "userRatingDecision")]
    pub user_rating_decisions: u32,
}

impl WatchedMovie {
    /// Derive a watched record from a fetched detail plus the chosen
    /// rating and the number of rating changes made before committing.
    pub fn from_detail(detail: &MovieDetail, user_rating: Option<u8>, decisions: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            runtime: detail.runtime_minutes(),
            imdb_rating: detail.imdb_rating_value(),
            user_rating,
            user_rating_decisions: decisions,
        }
    }
}

/// Aggregate statistics over a watched collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    pub fn of(watched: &[WatchedMovie]) -> Self {
        Self {
            count: watched.len(),
            avg_imdb_rating: average(watched.iter().map(|m| m.imdb_rating.unwrap_or(0.0))),
            avg_user_rating: average(watched.iter().map(|m| f64::from(m.user_rating.unwrap_or(0)))),
            avg_runtime: average(watched.iter().map(|m| f64::from(m.runtime.unwrap_or(0)))),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (count, sum) = values.fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
