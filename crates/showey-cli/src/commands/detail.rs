use anyhow::Result;
use movielog_models::MovieDetail;
use movielog_omdb::MovieDirectory;
use serde_json::json;

use crate::output::Output;

pub async fn run_detail(imdb_id: &str, output: &Output) -> Result<()> {
    let (config, _paths) = super::load_config()?;
    let directory = super::build_directory(&config)?;

    let detail = directory.fetch_detail(imdb_id).await?;
    print_detail(&detail, output);
    output.value(&json!({"type": "detail", "movie": detail}));
    Ok(())
}

pub(crate) fn print_detail(detail: &MovieDetail, output: &Output) {
    output.plain(format!("{} ({})", detail.title, detail.year));
    output.plain(format!("{} • {}", detail.released, detail.runtime));
    output.plain(detail.genre.clone());
    output.plain(format!("IMDb rating: {}", detail.imdb_rating));
    output.plain(String::new());
    output.plain(detail.plot.clone());
    output.plain(format!("Starring {}", detail.actors));
    output.plain(format!("Directed by {}", detail.director));
}
