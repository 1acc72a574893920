use movielog_models::MovieSummary;
use movielog_omdb::DirectoryError;
use tracing::debug;

/// Monotonically increasing id for issued search requests. A completion is
/// only applied when it carries the latest id, so a stale response can never
/// overwrite newer state.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading,
    Success(Vec<MovieSummary>),
    Error(String),
}

/// What the caller must do after a query change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Nothing to issue; any in-flight request is now stale.
    None,
    /// Issue a search for `query` and report back with `complete(id, ..)`.
    Issue { id: RequestId, query: String },
}

/// Search-as-you-type state machine.
///
/// Pure and synchronous: the async plumbing lives in [`crate::SearchDriver`].
pub struct SearchController {
    query: String,
    state: SearchState,
    latest: RequestId,
    min_query_len: usize,
}

impl SearchController {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            state: SearchState::Idle,
            latest: 0,
            min_query_len,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Results of the last successful search; empty in every other state.
    pub fn results(&self) -> &[MovieSummary] {
        match &self.state {
            SearchState::Success(movies) => movies,
            _ => &[],
        }
    }

    /// Apply a query change. Empty or too-short queries clear the results
    /// and return to idle; anything else enters loading and asks the caller
    /// to issue a request. Either way the previous request becomes stale.
    pub fn set_query(&mut self, query: &str) -> SearchAction {
        self.query = query.to_string();
        // Bump unconditionally: an in-flight completion must never apply to
        // the new query's state.
        self.latest += 1;

        if query.trim().len() < self.min_query_len {
            self.state = SearchState::Idle;
            return SearchAction::None;
        }

        self.state = SearchState::Loading;
        SearchAction::Issue {
            id: self.latest,
            query: query.to_string(),
        }
    }

    /// Apply a request outcome. Returns true if it was applied, false if it
    /// was stale and discarded.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<Vec<MovieSummary>, DirectoryError>,
    ) -> bool {
        if id != self.latest || self.state != SearchState::Loading {
            debug!(id, latest = self.latest, "discarding stale search completion");
            return false;
        }
        self.state = match outcome {
            Ok(movies) => SearchState::Success(movies),
            Err(e) => SearchState::Error(e.to_string()),
        };
        true
    }
}
