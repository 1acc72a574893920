use anyhow::Result;
use movielog_config::PathManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key-value persistence adapter: one JSON file per named state slot.
///
/// `load` never fails; absent or corrupt slots fall back to the caller's
/// default. `save` is best-effort: failures are logged and swallowed, the
/// caller is never interrupted by a bad disk.
#[derive(Clone)]
pub struct StateStore {
    state_dir: PathBuf,
}

impl StateStore {
    pub fn new(path_manager: &PathManager) -> Result<Self> {
        let state_dir = path_manager.state_dir();
        std::fs::create_dir_all(&state_dir)?;
        Ok(Self { state_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.state_dir.join(format!("{key}.json"))
    }

    pub fn load<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned,
    {
        let path = self.key_path(key);
        if !path.exists() {
            debug!(key, "state miss (file does not exist)");
            return default;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(key, "failed to read state file: {e}");
                return default;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => {
                debug!(key, "state hit");
                value
            }
            Err(e) => {
                warn!(key, "state corruption detected: {e}. Deleting corrupted file.");
                if let Err(rm_err) = std::fs::remove_file(&path) {
                    warn!(key, "failed to delete corrupted state file: {rm_err}");
                }
                default
            }
        }
    }

    pub fn save<T>(&self, key: &str, value: &T)
    where
        T: Serialize,
    {
        let path = self.key_path(key);
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, "failed to serialize state: {e}");
                return;
            }
        };
        match std::fs::write(&path, json) {
            Ok(()) => debug!(key, "state saved"),
            Err(e) => warn!(key, "failed to write state file: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &std::path::Path) -> StateStore {
        let paths = PathManager::from_base(dir.to_path_buf());
        StateStore::new(&paths).unwrap()
    }

    #[test]
    fn test_load_missing_key_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let value: Vec<String> = store.load("nothing", vec!["d".to_string()]);
        assert_eq!(value, vec!["d".to_string()]);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let value = vec!["tt001".to_string(), "tt002".to_string()];
        store.save("watched", &value);
        let loaded: Vec<String> = store.load("watched", Vec::new());
        assert_eq!(loaded, value);

        // Saving what was just loaded leaves the slot equal (round-trip law).
        store.save("watched", &loaded);
        let again: Vec<String> = store.load("watched", Vec::new());
        assert_eq!(again, loaded);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default_and_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let path = dir.path().join("data/state/watched.json");
        std::fs::write(&path, "{ not json").unwrap();

        let loaded: Vec<String> = store.load("watched", vec!["fallback".to_string()]);
        assert_eq!(loaded, vec!["fallback".to_string()]);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("slot", &vec![1, 2, 3]);
        store.save("slot", &vec![4]);
        let loaded: Vec<i32> = store.load("slot", Vec::new());
        assert_eq!(loaded, vec![4]);
    }
}
