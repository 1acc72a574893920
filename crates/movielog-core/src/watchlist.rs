use movielog_models::{WatchedMovie, WatchedSummary};
use tracing::{info, warn};

use crate::store::StateStore;

/// State slot the watched collection is persisted under.
pub const WATCHED_KEY: &str = "watched";

/// In-memory ordered collection of watched movies, seeded from and mirrored
/// to the persistence adapter. The store is the sole owner of its records;
/// every mutation rewrites the whole collection under [`WATCHED_KEY`].
pub struct WatchlistStore {
    items: Vec<WatchedMovie>,
    store: StateStore,
}

impl WatchlistStore {
    pub fn new(store: StateStore) -> Self {
        let items: Vec<WatchedMovie> = store.load(WATCHED_KEY, Vec::new());
        info!(count = items.len(), "loaded watched collection");
        Self { items, store }
    }

    pub fn items(&self) -> &[WatchedMovie] {
        &self.items
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.items.iter().any(|m| m.imdb_id == imdb_id)
    }

    /// Append a record. Duplicate ids are not rejected; re-adding a movie
    /// yields two entries (see DESIGN.md).
    pub fn add(&mut self, record: WatchedMovie) {
        if self.contains(&record.imdb_id) {
            warn!(imdb_id = %record.imdb_id, "adding a movie that is already in the watched list");
        }
        self.items.push(record);
        self.mirror();
    }

    /// Remove all entries with the given id. Removing an absent id is a
    /// no-op on the collection but still rewrites identical content.
    pub fn remove(&mut self, imdb_id: &str) {
        self.items.retain(|m| m.imdb_id != imdb_id);
        self.mirror();
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::of(&self.items)
    }

    fn mirror(&self) {
        self.store.save(WATCHED_KEY, &self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movielog_config::PathManager;
    use movielog_models::MovieDetail;

    fn store_in(dir: &std::path::Path) -> StateStore {
        let paths = PathManager::from_base(dir.to_path_buf());
        StateStore::new(&paths).unwrap()
    }

    fn record(id: &str, rating: u8) -> WatchedMovie {
        let detail = MovieDetail {
            imdb_id: id.to_string(),
            title: format!("Movie {id}"),
            year: "2005".to_string(),
            poster: "https://img/poster.jpg".to_string(),
            runtime: "140 min".to_string(),
            imdb_rating: "8.2".to_string(),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        };
        WatchedMovie::from_detail(&detail, Some(rating), 1)
    }

    #[test]
    fn test_add_mirrors_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut watchlist = WatchlistStore::new(store_in(dir.path()));
        watchlist.add(record("tt001", 9));

        // A second store seeded from the same directory sees the mutation.
        let reloaded = WatchlistStore::new(store_in(dir.path()));
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].imdb_id, "tt001");
    }

    #[test]
    fn test_remove_filters_by_id_and_mirrors() {
        let dir = tempfile::tempdir().unwrap();
        let mut watchlist = WatchlistStore::new(store_in(dir.path()));
        watchlist.add(record("tt001", 9));
        watchlist.add(record("tt002", 7));
        watchlist.remove("tt001");

        assert_eq!(watchlist.items().len(), 1);
        let reloaded = WatchlistStore::new(store_in(dir.path()));
        assert_eq!(reloaded.items()[0].imdb_id, "tt002");
    }

    #[test]
    fn test_remove_absent_id_is_a_noop_but_still_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut watchlist = WatchlistStore::new(store_in(dir.path()));
        watchlist.add(record("tt001", 9));

        let before = watchlist.items().to_vec();
        watchlist.remove("tt999");
        assert_eq!(watchlist.items(), before.as_slice());

        let reloaded = WatchlistStore::new(store_in(dir.path()));
        assert_eq!(reloaded.items(), before.as_slice());
    }

    #[test]
    fn test_duplicate_add_yields_two_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut watchlist = WatchlistStore::new(store_in(dir.path()));
        watchlist.add(record("tt001", 9));
        watchlist.add(record("tt001", 6));
        assert_eq!(watchlist.items().len(), 2);

        // remove drops every entry with the id
        watchlist.remove("tt001");
        assert!(watchlist.items().is_empty());
    }

    #[test]
    fn test_seeds_from_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut watchlist = WatchlistStore::new(store_in(dir.path()));
            watchlist.add(record("tt001", 9));
        }
        let watchlist = WatchlistStore::new(store_in(dir.path()));
        assert!(watchlist.contains("tt001"));
        assert_eq!(watchlist.summary().count, 1);
    }
}
