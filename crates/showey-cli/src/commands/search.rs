use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use movielog_core::{SearchDriver, SearchState};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::output::Output;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let (config, _paths) = super::load_config()?;
    let directory = Arc::new(super::build_directory(&config)?);

    // One-shot invocation: no keystrokes to debounce.
    let mut driver = SearchDriver::new(directory, config.search.min_query_len, Duration::ZERO);
    driver.set_query(query);

    match driver.settled().await {
        SearchState::Idle => {
            output.info(format!(
                "Query too short; type at least {} characters",
                config.search.min_query_len
            ));
        }
        SearchState::Success(movies) => {
            output.info(format!("Found {} results", movies.len()));
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["#", "Title", "Year", "IMDb ID"]);
            for (index, movie) in movies.iter().enumerate() {
                table.add_row(vec![
                    (index + 1).to_string(),
                    movie.title.clone(),
                    movie.year.clone(),
                    movie.imdb_id.clone(),
                ]);
            }
            output.plain(table.to_string());
            output.value(&json!({
                "type": "results",
                "query": query,
                "movies": movies,
            }));
        }
        SearchState::Error(message) => output.error(message),
        // settled() only returns once loading has resolved
        SearchState::Loading => {}
    }

    Ok(())
}
