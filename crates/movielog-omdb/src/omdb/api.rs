use movielog_models::{MovieDetail, MovieSummary};
use serde::Deserialize;

use crate::error::DirectoryError;

// OMDb reports failure inside a 200 body: { Response: "False", Error: "..." }.
// Body parsing is kept in pure functions so it can be tested without a socket.

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSummary>>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSummary {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetail {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "Runtime")]
    runtime: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: String,
    #[serde(rename = "Plot")]
    plot: String,
    #[serde(rename = "Released")]
    released: String,
    #[serde(rename = "Actors")]
    actors: String,
    #[serde(rename = "Director")]
    director: String,
    #[serde(rename = "Genre")]
    genre: String,
}

const NOT_FOUND_MESSAGE: &str = "Movie not found!";

pub fn search_url(base_url: &str, api_key: &str, query: &str) -> String {
    format!(
        "{}?apikey={}&s={}",
        base_url,
        api_key,
        urlencoding::encode(query)
    )
}

pub fn detail_url(base_url: &str, api_key: &str, imdb_id: &str) -> String {
    format!(
        "{}?apikey={}&i={}",
        base_url,
        api_key,
        urlencoding::encode(imdb_id)
    )
}

pub fn parse_search_body(body: &str) -> Result<Vec<MovieSummary>, DirectoryError> {
    let response: OmdbSearchResponse = serde_json::from_str(body)?;

    if response.response.eq_ignore_ascii_case("false") {
        let message = response.error.unwrap_or_else(|| "unknown error".to_string());
        if message == NOT_FOUND_MESSAGE {
            return Err(DirectoryError::NotFound);
        }
        return Err(DirectoryError::Api(message));
    }

    let summaries = response
        .search
        .unwrap_or_default()
        .into_iter()
        .map(|m| MovieSummary {
            imdb_id: m.imdb_id,
            title: m.title,
            year: m.year,
            poster: m.poster,
        })
        .collect::<Vec<_>>();

    // A "True" response with no entries has not been observed, but treat it
    // the same as the provider's own zero-match report.
    if summaries.is_empty() {
        return Err(DirectoryError::NotFound);
    }

    Ok(summaries)
}

pub fn parse_detail_body(body: &str) -> Result<MovieDetail, DirectoryError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("Response").and_then(|v| v.as_str()) == Some("False") {
        let message = value
            .get("Error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(DirectoryError::Api(message));
    }

    let detail: OmdbDetail = serde_json::from_value(value)?;

    Ok(MovieDetail {
        imdb_id: detail.imdb_id,
        title: detail.title,
        year: detail.year,
        poster: detail.poster,
        runtime: detail.runtime,
        imdb_rating: detail.imdb_rating,
        plot: detail.plot,
        released: detail.released,
        actors: detail.actors,
        director: detail.director,
        genre: detail.genre,
    })
}
