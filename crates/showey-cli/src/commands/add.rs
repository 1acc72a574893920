use anyhow::Result;
use movielog_core::AppSession;
use serde_json::json;
use std::sync::Arc;

use crate::output::Output;

pub async fn run_add(imdb_id: &str, rating: u8, output: &Output) -> Result<()> {
    let (config, paths) = super::load_config()?;
    let directory = Arc::new(super::build_directory(&config)?);
    let watchlist = super::build_watchlist(&paths)?;

    let mut session = AppSession::new(directory, watchlist, super::search_options(&config));

    session.select(imdb_id).await?;
    if session.watchlist().contains(imdb_id) {
        output.info(format!("{imdb_id} is already in the watched list; adding again"));
    }
    session.set_rating(rating)?;
    let record = session.commit_rating()?;

    output.success(format!(
        "Added {} ({}) with rating {}/10",
        record.title, record.year, rating
    ));
    output.value(&json!({"type": "added", "record": record}));
    Ok(())
}
