use anyhow::Result;
use movielog_config::{Config, PathManager};
use movielog_core::{SearchOptions, StateStore, WatchlistStore};
use movielog_omdb::OmdbClient;
use std::time::Duration;

pub mod add;
pub mod config;
pub mod detail;
pub mod interactive;
pub mod remove;
pub mod search;
pub mod watched;

pub(crate) fn load_config() -> Result<(Config, PathManager)> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())?;
    config.validate()?;
    tracing::debug!(path = %paths.config_file().display(), "loaded configuration");
    Ok((config, paths))
}

pub(crate) fn build_directory(config: &Config) -> Result<OmdbClient> {
    Ok(OmdbClient::with_base_url(
        config.omdb.api_key.clone(),
        config.omdb.base_url.clone(),
        config.omdb.timeout_secs,
    )?)
}

pub(crate) fn build_watchlist(paths: &PathManager) -> Result<WatchlistStore> {
    Ok(WatchlistStore::new(StateStore::new(paths)?))
}

pub(crate) fn search_options(config: &Config) -> SearchOptions {
    SearchOptions {
        min_query_len: config.search.min_query_len,
        debounce: Duration::from_millis(config.search.debounce_ms),
    }
}
