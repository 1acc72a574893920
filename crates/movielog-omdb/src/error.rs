use thiserror::Error;

/// Failure taxonomy for the remote movie directory.
///
/// Zero search matches is a distinguished condition, not an empty success:
/// callers surface it as a user-visible message, never as an empty list.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Movie not found!")]
    NotFound,

    #[error("directory error: {0}")]
    Api(String),

    #[error("malformed directory response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
