use std::time::Duration;

use async_trait::async_trait;
use movielog_models::{MovieDetail, MovieSummary};
use reqwest::Client;
use tracing::debug;

use crate::error::DirectoryError;
use crate::omdb::api;
use crate::traits::MovieDirectory;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the OMDb search provider.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DirectoryError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, DirectoryError> {
        // A hung provider request is otherwise indistinguishable from a slow
        // one; the timeout bounds both search and detail fetches.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    async fn get_body(&self, url: &str) -> Result<String, DirectoryError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::Api(format!(
                "provider returned {}: {}",
                status, body
            )));
        }
        Ok(body)
    }
}

#[async_trait]
impl MovieDirectory for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, DirectoryError> {
        let url = api::search_url(&self.base_url, &self.api_key, query);
        debug!(query, "searching movie directory");
        let body = self.get_body(&url).await?;
        api::parse_search_body(&body)
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError> {
        let url = api::detail_url(&self.base_url, &self.api_key, imdb_id);
        debug!(imdb_id, "fetching movie detail");
        let body = self.get_body(&url).await?;
        api::parse_detail_body(&body)
    }
}
