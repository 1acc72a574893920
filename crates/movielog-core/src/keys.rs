use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Key events the application reacts to outside of plain text entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Enter,
    Escape,
    Backspace,
    Char(char),
}

/// Commands a key binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Focus the search box and clear the query.
    FocusSearch,
    /// Close the open detail pane.
    CloseDetail,
}

struct Binding {
    id: u64,
    keys: Vec<KeyEvent>,
    command: KeyCommand,
}

#[derive(Default)]
struct RouterInner {
    next_id: u64,
    bindings: Vec<Binding>,
}

/// Explicit registry for global key bindings.
///
/// Bindings are never ambient: `bind` returns a guard, and dropping the
/// guard unregisters the binding. Later bindings shadow earlier ones for
/// the same key.
#[derive(Clone, Default)]
pub struct KeyRouter {
    inner: Arc<Mutex<RouterInner>>,
}

fn lock(inner: &Mutex<RouterInner>) -> MutexGuard<'_, RouterInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the subscription removes the binding"]
    pub fn bind(&self, keys: &[KeyEvent], command: KeyCommand) -> KeySubscription {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.bindings.push(Binding {
            id,
            keys: keys.to_vec(),
            command,
        });
        KeySubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<KeyCommand> {
        let inner = lock(&self.inner);
        inner
            .bindings
            .iter()
            .rev()
            .find(|b| b.keys.contains(event))
            .map(|b| b.command)
    }
}

/// Cancel-on-teardown handle for a registered key binding.
pub struct KeySubscription {
    id: u64,
    inner: Weak<Mutex<RouterInner>>,
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).bindings.retain(|b| b.id != self.id);
        }
    }
}
