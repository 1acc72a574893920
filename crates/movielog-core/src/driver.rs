use std::sync::Arc;
use std::time::Duration;

use movielog_models::MovieSummary;
use movielog_omdb::{DirectoryError, MovieDirectory};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::search::{RequestId, SearchAction, SearchController, SearchState};

type SearchOutcome = (RequestId, Result<Vec<MovieSummary>, DirectoryError>);

/// Async front of the search controller.
///
/// At most one logical request is outstanding: issuing a new query aborts
/// the previous task (best effort) and, independently of whether the abort
/// lands, the controller discards any completion that is not the latest.
/// The optional debounce sleep runs inside the task, so a quick follow-up
/// keystroke cancels the request before it ever reaches the wire.
pub struct SearchDriver {
    controller: SearchController,
    directory: Arc<dyn MovieDirectory>,
    debounce: Duration,
    inflight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SearchOutcome>,
    rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl SearchDriver {
    pub fn new(directory: Arc<dyn MovieDirectory>, min_query_len: usize, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: SearchController::new(min_query_len),
            directory,
            debounce,
            inflight: None,
            tx,
            rx,
        }
    }

    pub fn query(&self) -> &str {
        self.controller.query()
    }

    pub fn state(&self) -> &SearchState {
        self.controller.state()
    }

    pub fn results(&self) -> &[MovieSummary] {
        self.controller.results()
    }

    /// Apply a query change and kick off the request it calls for.
    pub fn set_query(&mut self, query: &str) {
        let action = self.controller.set_query(query);
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        if let SearchAction::Issue { id, query } = action {
            let directory = Arc::clone(&self.directory);
            let tx = self.tx.clone();
            let debounce = self.debounce;
            self.inflight = Some(tokio::spawn(async move {
                if !debounce.is_zero() {
                    tokio::time::sleep(debounce).await;
                }
                let outcome = directory.search(&query).await;
                // The receiver outlives the tasks; a send failure just means
                // the driver is gone and the result has nowhere to go.
                let _ = tx.send((id, outcome));
            }));
        }
    }

    /// Drain completions that have already arrived without waiting.
    pub fn pump(&mut self) {
        while let Ok((id, outcome)) = self.rx.try_recv() {
            self.controller.complete(id, outcome);
        }
    }

    /// Wait until the current query's request settles (or the state is
    /// already settled), discarding stale completions along the way.
    pub async fn settled(&mut self) -> &SearchState {
        while *self.controller.state() == SearchState::Loading {
            match self.rx.recv().await {
                Some((id, outcome)) => {
                    self.controller.complete(id, outcome);
                }
                None => break,
            }
        }
        self.controller.state()
    }
}

impl Drop for SearchDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
