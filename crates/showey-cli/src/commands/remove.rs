use anyhow::Result;
use serde_json::json;

use crate::output::Output;

pub fn run_remove(imdb_id: &str, output: &Output) -> Result<()> {
    let (_config, paths) = super::load_config()?;
    let mut watchlist = super::build_watchlist(&paths)?;

    let existed = watchlist.contains(imdb_id);
    watchlist.remove(imdb_id);

    if existed {
        output.success(format!("Removed {imdb_id} from the watched list"));
    } else {
        output.info(format!("{imdb_id} was not in the watched list"));
    }
    output.value(&json!({"type": "removed", "imdb_id": imdb_id, "existed": existed}));
    Ok(())
}
