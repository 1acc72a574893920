use async_trait::async_trait;
use movielog_models::{MovieDetail, MovieSummary};

use crate::error::DirectoryError;

/// A remote, searchable movie catalog.
///
/// One outbound request per call; no retries, no caching. The seam exists
/// so the search and detail flows can be driven against an in-memory
/// directory in tests.
#[async_trait]
pub trait MovieDirectory: Send + Sync {
    /// Free-text search. Zero matches fails with [`DirectoryError::NotFound`].
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, DirectoryError>;

    /// Fetch the full record for one catalog id.
    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError>;
}
