//! In-memory movie directory for exercising the search and detail flows
//! without a socket.

use async_trait::async_trait;
use movielog_models::{MovieDetail, MovieSummary};
use movielog_omdb::{DirectoryError, MovieDirectory};
use std::collections::HashMap;
use std::time::Duration;

pub fn summaries(ids: &[&str]) -> Vec<MovieSummary> {
    ids.iter()
        .map(|id| MovieSummary {
            imdb_id: (*id).to_string(),
            title: format!("Movie {id}"),
            year: "2005".to_string(),
            poster: "https://img/poster.jpg".to_string(),
        })
        .collect()
}

pub fn detail(id: &str, title: &str, runtime: &str, rating: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster: "https://img/poster.jpg".to_string(),
        runtime: runtime.to_string(),
        imdb_rating: rating.to_string(),
        plot: "A plot.".to_string(),
        released: "15 Jun 2005".to_string(),
        actors: "Some Actors".to_string(),
        director: "A Director".to_string(),
        genre: "Action".to_string(),
    }
}

pub enum ScriptedOutcome {
    Results(Vec<MovieSummary>),
    NotFound,
    Fail(String),
}

struct ScriptedSearch {
    delay: Duration,
    outcome: ScriptedOutcome,
}

/// Directory with canned, per-query responses and delays.
#[derive(Default)]
pub struct ScriptedDirectory {
    searches: HashMap<String, ScriptedSearch>,
    details: HashMap<String, MovieDetail>,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, query: &str, delay: Duration, outcome: ScriptedOutcome) -> Self {
        self.searches.insert(
            query.to_string(),
            ScriptedSearch { delay, outcome },
        );
        self
    }

    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.imdb_id.clone(), detail);
        self
    }
}

#[async_trait]
impl MovieDirectory for ScriptedDirectory {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, DirectoryError> {
        let Some(scripted) = self.searches.get(query) else {
            return Err(DirectoryError::NotFound);
        };
        tokio::time::sleep(scripted.delay).await;
        match &scripted.outcome {
            ScriptedOutcome::Results(movies) => Ok(movies.clone()),
            ScriptedOutcome::NotFound => Err(DirectoryError::NotFound),
            ScriptedOutcome::Fail(message) => Err(DirectoryError::Api(message.clone())),
        }
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError> {
        self.details
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| DirectoryError::Api(format!("Incorrect IMDb ID: {imdb_id}")))
    }
}
