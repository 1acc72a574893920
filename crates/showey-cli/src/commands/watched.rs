use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use movielog_core::WatchlistStore;
use serde_json::json;

use crate::output::Output;

pub fn run_watched(output: &Output) -> Result<()> {
    let (_config, paths) = super::load_config()?;
    let watchlist = super::build_watchlist(&paths)?;
    print_watched(&watchlist, output);
    Ok(())
}

pub(crate) fn print_watched(watchlist: &WatchlistStore, output: &Output) {
    let summary = watchlist.summary();
    if summary.count == 0 {
        output.info("No watched movies yet");
        output.value(&json!({"type": "watched", "movies": [], "summary": summary}));
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Title", "Year", "IMDb", "Yours", "Runtime", "IMDb ID"]);
    for movie in watchlist.items() {
        table.add_row(vec![
            movie.title.clone(),
            movie.year.clone(),
            movie
                .imdb_rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.1}")),
            movie
                .user_rating
                .map_or_else(|| "-".to_string(), |r| r.to_string()),
            movie
                .runtime
                .map_or_else(|| "-".to_string(), |m| format!("{m} min")),
            movie.imdb_id.clone(),
        ]);
    }
    output.plain(table.to_string());
    output.info(format!(
        "{} movies watched • avg IMDb {:.1} • avg yours {:.1} • avg runtime {:.1} min",
        summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime
    ));
    output.value(&json!({
        "type": "watched",
        "movies": watchlist.items(),
        "summary": summary,
    }));
}
