//! Browser history abstraction.
//!
//! # Responsibilities
//! - Push history entries carrying a state snapshot
//! - Report the current location path
//! - Deliver back/forward ("pop") events to registered handlers
//!
//! # Design Decisions
//! - Handlers are registered per application tree, never globally
//! - Registration returns a guard; dropping it deregisters the handler
//! - `MemoryHistory` is the in-process implementation

use std::sync::{Arc, Mutex, PoisonError};

use crate::store::AppState;

/// Identifier of a registered pop handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Called with the current path after a back/forward navigation.
pub type PopHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Session history as seen by the router.
pub trait History: Send + Sync {
    /// Record a new entry for `path`, carrying `snapshot`.
    fn push(&self, snapshot: &AppState, path: &str);

    /// Path of the current entry.
    fn current_path(&self) -> String;

    fn add_pop_handler(&self, handler: PopHandler) -> HandlerId;

    fn remove_pop_handler(&self, id: HandlerId);
}

/// Scoped registration of a pop handler.
#[must_use = "dropping a PopRegistration removes the handler"]
pub struct PopRegistration {
    history: Arc<dyn History>,
    id: HandlerId,
}

impl PopRegistration {
    /// Register `handler` on `history` until the returned guard is dropped.
    pub fn register(history: Arc<dyn History>, handler: PopHandler) -> Self {
        let id = history.add_pop_handler(handler);
        Self { history, id }
    }
}

impl Drop for PopRegistration {
    fn drop(&mut self) {
        self.history.remove_pop_handler(self.id);
    }
}

impl std::fmt::Debug for PopRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopRegistration").field("id", &self.id).finish()
    }
}

/// One history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: String,
    pub state: Option<AppState>,
}

#[derive(Default)]
struct MemoryInner {
    entries: Vec<HistoryEntry>,
    index: usize,
    handlers: Vec<(HandlerId, PopHandler)>,
    next_id: u64,
}

/// History kept in memory. Starts with a single entry for the initial path.
pub struct MemoryHistory {
    inner: Mutex<MemoryInner>,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                entries: vec![HistoryEntry {
                    path: initial_path.into(),
                    state: None,
                }],
                ..MemoryInner::default()
            }),
        }
    }

    /// Move one entry back. Returns false at the start of history.
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Move one entry forward. Returns false at the end of history.
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().entries.clone()
    }

    /// Snapshot stored with the current entry.
    pub fn current_state(&self) -> Option<AppState> {
        let inner = self.lock();
        inner.entries.get(inner.index).and_then(|e| e.state.clone())
    }

    pub fn pop_handler_count(&self) -> usize {
        self.lock().handlers.len()
    }

    fn traverse(&self, delta: isize) -> bool {
        let (path, handlers) = {
            let mut inner = self.lock();
            let Some(target) = inner.index.checked_add_signed(delta) else {
                return false;
            };
            if target >= inner.entries.len() {
                return false;
            }
            inner.index = target;
            let handlers: Vec<PopHandler> = inner.handlers.iter().map(|(_, h)| h.clone()).collect();
            (inner.entries[target].path.clone(), handlers)
        };

        for handler in handlers {
            handler(&path);
        }
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl History for MemoryHistory {
    fn push(&self, snapshot: &AppState, path: &str) {
        let mut inner = self.lock();
        // Pushing discards any forward entries.
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(HistoryEntry {
            path: path.to_string(),
            state: Some(snapshot.clone()),
        });
        inner.index = inner.entries.len() - 1;
    }

    fn current_path(&self) -> String {
        let inner = self.lock();
        inner
            .entries
            .get(inner.index)
            .map(|e| e.path.clone())
            .unwrap_or_else(|| "/".to_string())
    }

    fn add_pop_handler(&self, handler: PopHandler) -> HandlerId {
        let mut inner = self.lock();
        let id = HandlerId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((id, handler));
        id
    }

    fn remove_pop_handler(&self, id: HandlerId) {
        self.lock().handlers.retain(|(h, _)| *h != id);
    }
}
