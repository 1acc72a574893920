use anyhow::Result;
use serde_json::json;

use crate::output::Output;
use crate::ConfigCommands;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Set {
            api_key,
            base_url,
            timeout_secs,
            min_query_len,
            debounce_ms,
        } => set_config(api_key, base_url, timeout_secs, min_query_len, debounce_ms, output),
    }
}

fn mask(secret: &str) -> String {
    if secret.len() <= 2 {
        return "*".repeat(secret.len());
    }
    format!("{}{}", &secret[..2], "*".repeat(secret.len() - 2))
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let (config, paths) = super::load_config()?;

    let api_key = if full {
        config.omdb.api_key.clone()
    } else {
        mask(&config.omdb.api_key)
    };

    output.info(format!("Config file: {}", paths.config_file().display()));
    output.plain(format!("  omdb.api_key       = {api_key}"));
    output.plain(format!("  omdb.base_url      = {}", config.omdb.base_url));
    output.plain(format!("  omdb.timeout_secs  = {}", config.omdb.timeout_secs));
    output.plain(format!("  search.min_query_len = {}", config.search.min_query_len));
    output.plain(format!("  search.debounce_ms   = {}", config.search.debounce_ms));
    output.value(&json!({
        "type": "config",
        "path": paths.config_file().display().to_string(),
        "omdb": {
            "api_key": api_key,
            "base_url": config.omdb.base_url,
            "timeout_secs": config.omdb.timeout_secs,
        },
        "search": {
            "min_query_len": config.search.min_query_len,
            "debounce_ms": config.search.debounce_ms,
        },
    }));
    Ok(())
}

fn set_config(
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    min_query_len: Option<usize>,
    debounce_ms: Option<u64>,
    output: &Output,
) -> Result<()> {
    let paths = movielog_config::PathManager::default();
    paths.ensure_directories()?;
    let mut config = movielog_config::Config::load_or_default(&paths.config_file())?;

    if let Some(api_key) = api_key {
        config.omdb.api_key = api_key;
    }
    if let Some(base_url) = base_url {
        config.omdb.base_url = base_url;
    }
    if let Some(timeout_secs) = timeout_secs {
        config.omdb.timeout_secs = timeout_secs;
    }
    if let Some(min_query_len) = min_query_len {
        config.search.min_query_len = min_query_len;
    }
    if let Some(debounce_ms) = debounce_ms {
        config.search.debounce_ms = debounce_ms;
    }

    config.validate()?;
    config.save_to_file(&paths.config_file())?;
    output.success(format!("Saved {}", paths.config_file().display()));
    Ok(())
}
