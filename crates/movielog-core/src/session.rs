use std::sync::Arc;
use std::time::Duration;

use movielog_models::{MovieDetail, WatchedMovie};
use movielog_omdb::{DirectoryError, MovieDirectory};
use thiserror::Error;
use tracing::info;

use crate::driver::SearchDriver;
use crate::keys::{KeyCommand, KeyEvent, KeyRouter, KeySubscription};
use crate::search::SearchState;
use crate::watchlist::WatchlistStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("rating must be between 1 and 10, got {0}")]
    RatingOutOfRange(u8),
    #[error("no movie detail is open")]
    NoOpenDetail,
    #[error("movie detail is still loading")]
    DetailNotLoaded,
    #[error("no rating has been chosen")]
    NoRatingChosen,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub min_query_len: usize,
    pub debounce: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            debounce: Duration::from_millis(300),
        }
    }
}

/// The open detail view: selected id, the fetched record once it arrives,
/// and the rating the user is converging on. Holds its own Escape/Backspace
/// binding so closing the pane tears the binding down with it.
pub struct DetailPane {
    imdb_id: String,
    detail: Option<MovieDetail>,
    rating: Option<u8>,
    decisions: u32,
    _close_binding: KeySubscription,
}

impl DetailPane {
    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    /// None while the fetch is still pending.
    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn decisions(&self) -> u32 {
        self.decisions
    }
}

pub enum ViewState {
    List,
    Detail(DetailPane),
}

impl ViewState {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }
}

/// One user's session: search, selection, rating, and the watched list.
///
/// Single logical thread of control; all state is mutated through these
/// methods, never shared.
pub struct AppSession {
    directory: Arc<dyn MovieDirectory>,
    search: SearchDriver,
    watchlist: WatchlistStore,
    view: ViewState,
    keys: KeyRouter,
    search_focused: bool,
    _search_binding: KeySubscription,
}

impl AppSession {
    pub fn new(
        directory: Arc<dyn MovieDirectory>,
        watchlist: WatchlistStore,
        options: SearchOptions,
    ) -> Self {
        let keys = KeyRouter::new();
        let search_binding = keys.bind(&[KeyEvent::Enter], KeyCommand::FocusSearch);
        let search = SearchDriver::new(
            Arc::clone(&directory),
            options.min_query_len,
            options.debounce,
        );
        Self {
            directory,
            search,
            watchlist,
            view: ViewState::List,
            keys,
            search_focused: false,
            _search_binding: search_binding,
        }
    }

    // --- search ---

    pub fn set_query(&mut self, query: &str) {
        self.search_focused = true;
        self.search.set_query(query);
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn results(&self) -> &[movielog_models::MovieSummary] {
        self.search.results()
    }

    /// Wait for the current query's request to settle.
    pub async fn search_settled(&mut self) -> &SearchState {
        self.search.settled().await
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    // --- selection / detail ---

    /// Select a movie for the detail view. Selecting the already-open id
    /// closes the pane instead (toggle). Opens the pane in loading state,
    /// then fetches the detail; a fetch for a pane the user has already
    /// navigated away from is not applied.
    pub async fn select(&mut self, imdb_id: &str) -> Result<(), SessionError> {
        if let ViewState::Detail(pane) = &self.view {
            if pane.imdb_id == imdb_id {
                self.close_detail();
                return Ok(());
            }
        }

        let close_binding = self
            .keys
            .bind(&[KeyEvent::Escape, KeyEvent::Backspace], KeyCommand::CloseDetail);
        self.view = ViewState::Detail(DetailPane {
            imdb_id: imdb_id.to_string(),
            detail: None,
            rating: None,
            decisions: 0,
            _close_binding: close_binding,
        });

        let detail = self.directory.fetch_detail(imdb_id).await?;
        if let ViewState::Detail(pane) = &mut self.view {
            if pane.imdb_id == imdb_id {
                pane.detail = Some(detail);
            }
        }
        Ok(())
    }

    /// Close the detail view with no side effects.
    pub fn close_detail(&mut self) {
        self.view = ViewState::List;
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    // --- rating ---

    /// Record the user's current rating choice. Every call counts as one
    /// decision, committed or not.
    pub fn set_rating(&mut self, rating: u8) -> Result<(), SessionError> {
        if !(1..=10).contains(&rating) {
            return Err(SessionError::RatingOutOfRange(rating));
        }
        let ViewState::Detail(pane) = &mut self.view else {
            return Err(SessionError::NoOpenDetail);
        };
        pane.rating = Some(rating);
        pane.decisions += 1;
        Ok(())
    }

    /// Derive a watched record from the open detail plus the chosen rating
    /// and decision count, append it to the watched list, and return to the
    /// list view.
    pub fn commit_rating(&mut self) -> Result<WatchedMovie, SessionError> {
        let ViewState::Detail(pane) = &self.view else {
            return Err(SessionError::NoOpenDetail);
        };
        let detail = pane.detail().ok_or(SessionError::DetailNotLoaded)?;
        let rating = pane.rating().ok_or(SessionError::NoRatingChosen)?;

        let record = WatchedMovie::from_detail(detail, Some(rating), pane.decisions());
        info!(imdb_id = %record.imdb_id, rating, "adding movie to watched list");
        self.watchlist.add(record.clone());
        self.close_detail();
        Ok(record)
    }

    // --- watched list ---

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    pub fn remove_watched(&mut self, imdb_id: &str) {
        self.watchlist.remove(imdb_id);
    }

    // --- keys ---

    /// Dispatch a global key event through the binding registry.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<KeyCommand> {
        let command = self.keys.resolve(&event)?;
        match command {
            KeyCommand::FocusSearch => {
                // Enter inside the search box is plain text entry.
                if self.search_focused {
                    return None;
                }
                self.search_focused = true;
                self.search.set_query("");
            }
            KeyCommand::CloseDetail => self.close_detail(),
        }
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StateStore;
    use crate::testing::{detail, summaries, ScriptedDirectory, ScriptedOutcome};
    use crate::watchlist::WATCHED_KEY;
    use movielog_config::PathManager;

    fn watchlist_in(dir: &std::path::Path) -> WatchlistStore {
        let paths = PathManager::from_base(dir.to_path_buf());
        WatchlistStore::new(StateStore::new(&paths).unwrap())
    }

    fn batman_directory() -> ScriptedDirectory {
        ScriptedDirectory::new()
            .on_search(
                "batman",
                Duration::from_millis(10),
                ScriptedOutcome::Results(summaries(&["tt0096895", "tt0372784"])),
            )
            .with_detail(detail("tt0372784", "Batman Begins", "140 min", "8.2"))
    }

    fn options() -> SearchOptions {
        SearchOptions {
            min_query_len: 3,
            debounce: Duration::ZERO,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_select_rate_add_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AppSession::new(
            Arc::new(batman_directory()),
            watchlist_in(dir.path()),
            options(),
        );

        session.set_query("batman");
        session.search_settled().await;
        assert_eq!(session.results().len(), 2);

        let second = session.results()[1].imdb_id.clone();
        session.select(&second).await.unwrap();
        let ViewState::Detail(pane) = session.view() else {
            panic!("expected an open detail pane");
        };
        assert_eq!(pane.detail().unwrap().title, "Batman Begins");

        // User tries 7 first, then settles on 9.
        session.set_rating(7).unwrap();
        session.set_rating(9).unwrap();
        let record = session.commit_rating().unwrap();

        assert_eq!(record.runtime, Some(140));
        assert_eq!(record.imdb_rating, Some(8.2));
        assert_eq!(record.user_rating, Some(9));
        assert_eq!(record.user_rating_decisions, 2);
        assert!(session.view().is_list());
        assert_eq!(session.watchlist().items().len(), 1);

        // Persisted under the "watched" slot.
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let store = StateStore::new(&paths).unwrap();
        let persisted: Vec<WatchedMovie> = store.load(WATCHED_KEY, Vec::new());
        assert_eq!(persisted, vec![record]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selecting_open_movie_toggles_pane_closed() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AppSession::new(
            Arc::new(batman_directory()),
            watchlist_in(dir.path()),
            options(),
        );

        session.select("tt0372784").await.unwrap();
        assert!(!session.view().is_list());
        session.select("tt0372784").await.unwrap();
        assert!(session.view().is_list());
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_closes_detail_and_binding_tears_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AppSession::new(
            Arc::new(batman_directory()),
            watchlist_in(dir.path()),
            options(),
        );

        session.select("tt0372784").await.unwrap();
        assert_eq!(
            session.handle_key(KeyEvent::Escape),
            Some(KeyCommand::CloseDetail)
        );
        assert!(session.view().is_list());

        // The pane's binding went away with the pane.
        assert_eq!(session.handle_key(KeyEvent::Backspace), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_focuses_search_only_when_not_focused() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AppSession::new(
            Arc::new(batman_directory()),
            watchlist_in(dir.path()),
            options(),
        );

        assert_eq!(
            session.handle_key(KeyEvent::Enter),
            Some(KeyCommand::FocusSearch)
        );
        assert!(session.search_focused());
        assert_eq!(session.query(), "");

        // Already focused: Enter is ignored.
        assert_eq!(session.handle_key(KeyEvent::Enter), None);

        session.set_query("batman");
        session.blur_search();
        assert_eq!(
            session.handle_key(KeyEvent::Enter),
            Some(KeyCommand::FocusSearch)
        );
        // Focusing clears the query.
        assert_eq!(session.query(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rating_validation_and_commit_preconditions() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AppSession::new(
            Arc::new(batman_directory()),
            watchlist_in(dir.path()),
            options(),
        );

        assert!(matches!(
            session.set_rating(5),
            Err(SessionError::NoOpenDetail)
        ));

        session.select("tt0372784").await.unwrap();
        assert!(matches!(
            session.set_rating(0),
            Err(SessionError::RatingOutOfRange(0))
        ));
        assert!(matches!(
            session.set_rating(11),
            Err(SessionError::RatingOutOfRange(11))
        ));
        assert!(matches!(
            session.commit_rating(),
            Err(SessionError::NoRatingChosen)
        ));

        session.set_rating(10).unwrap();
        assert!(session.commit_rating().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_detail_fetch_surfaces_error_and_pane_stays_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AppSession::new(
            Arc::new(batman_directory()),
            watchlist_in(dir.path()),
            options(),
        );

        let err = session.select("tt9999999").await.unwrap_err();
        assert!(matches!(err, SessionError::Directory(_)));
        let ViewState::Detail(pane) = session.view() else {
            panic!("pane should still be open");
        };
        assert!(pane.detail().is_none());
    }

}
