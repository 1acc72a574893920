pub mod driver;
pub mod keys;
pub mod search;
pub mod session;
pub mod store;
pub mod watchlist;

pub use driver::SearchDriver;
pub use keys::{KeyCommand, KeyEvent, KeyRouter, KeySubscription};
pub use search::{RequestId, SearchAction, SearchController, SearchState};
pub use session::{AppSession, DetailPane, SearchOptions, SessionError, ViewState};
pub use store::StateStore;
pub use watchlist::{WatchlistStore, WATCHED_KEY};

#[cfg(test)]
pub(crate) mod testing;
