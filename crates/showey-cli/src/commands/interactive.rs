use anyhow::Result;
use movielog_core::{AppSession, KeyEvent, SearchState, ViewState};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::commands::{detail, watched};
use crate::output::Output;

const HELP: &str = "\
Type text to search as you type (each line is the current query).
  :open <n>          open result n
  :rate <n>          choose a rating 1-10
  :add               commit the rating and add to the watched list
  :esc | :back       close the detail pane (Escape / Backspace)
  :enter             press Enter outside the search box (refocus + clear)
  :watched           show the watched list
  :remove <imdb-id>  remove a movie from the watched list
  :help              show this help
  :quit              exit";

pub async fn run_interactive(output: &Output) -> Result<()> {
    let (config, paths) = super::load_config()?;
    let directory = Arc::new(super::build_directory(&config)?);
    let watchlist = super::build_watchlist(&paths)?;
    let mut session = AppSession::new(directory, watchlist, super::search_options(&config));

    output.info(HELP);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();

        match parse_command(line) {
            Command::Quit => break,
            Command::Help => output.info(HELP),
            Command::Open(index) => {
                let Some(movie) = session.results().get(index.saturating_sub(1)) else {
                    output.error(format!("no result #{index}"));
                    continue;
                };
                let imdb_id = movie.imdb_id.clone();
                session.blur_search();
                match session.select(&imdb_id).await {
                    Ok(()) => render_view(&session, output),
                    Err(e) => output.error(format!("detail fetch failed: {e}")),
                }
            }
            Command::Rate(rating) => match session.set_rating(rating) {
                Ok(()) => output.info(format!("rating set to {rating}/10")),
                Err(e) => output.error(e.to_string()),
            },
            Command::Add => match session.commit_rating() {
                Ok(record) => output.success(format!(
                    "Added {} with rating {}/10",
                    record.title,
                    record.user_rating.unwrap_or_default()
                )),
                Err(e) => output.error(e.to_string()),
            },
            Command::Key(event) => {
                session.handle_key(event);
                render_view(&session, output);
            }
            Command::Watched => watched::print_watched(session.watchlist(), output),
            Command::Remove(imdb_id) => {
                session.remove_watched(&imdb_id);
                output.success(format!("Removed {imdb_id}"));
            }
            Command::Query(query) => {
                session.set_query(&query);
                session.search_settled().await;
                render_search(&session, output);
            }
        }
    }

    Ok(())
}

enum Command {
    Query(String),
    Open(usize),
    Rate(u8),
    Add,
    Key(KeyEvent),
    Watched,
    Remove(String),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Query(trimmed.to_string());
    };

    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("open") => parts
            .next()
            .and_then(|n| n.parse().ok())
            .map_or(Command::Help, Command::Open),
        Some("rate") => parts
            .next()
            .and_then(|n| n.parse().ok())
            .map_or(Command::Help, Command::Rate),
        Some("add") => Command::Add,
        Some("esc") => Command::Key(KeyEvent::Escape),
        Some("back") => Command::Key(KeyEvent::Backspace),
        Some("enter") => Command::Key(KeyEvent::Enter),
        Some("watched") => Command::Watched,
        Some("remove") => parts
            .next()
            .map_or(Command::Help, |id| Command::Remove(id.to_string())),
        Some("quit") | Some("q") => Command::Quit,
        _ => Command::Help,
    }
}

fn render_search(session: &AppSession, output: &Output) {
    match session.search_state() {
        SearchState::Idle => output.info("(type at least a few characters to search)"),
        SearchState::Success(movies) => {
            output.info(format!("Found {} results", movies.len()));
            for (index, movie) in movies.iter().enumerate() {
                output.plain(format!(
                    "  {}. {} ({})  [{}]",
                    index + 1,
                    movie.title,
                    movie.year,
                    movie.imdb_id
                ));
            }
        }
        SearchState::Error(message) => output.error(message),
        SearchState::Loading => output.info("Loading..."),
    }
}

fn render_view(session: &AppSession, output: &Output) {
    match session.view() {
        ViewState::List => render_search(session, output),
        ViewState::Detail(pane) => match pane.detail() {
            Some(record) => detail::print_detail(record, output),
            None => output.info("Loading..."),
        },
    }
}
