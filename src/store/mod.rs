//! State store subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch(Action)
//!     → actions.rs reducer (old snapshot + action → new snapshot)
//!     → swap Arc<AppState>
//!     → notify every subscriber synchronously
//!
//! Server:  one Store per request, seeded with AppState::default()
//! Browser: one Store per page, seeded from window.__state (hydration.rs)
//! ```
//!
//! # Design Decisions
//! - Snapshots are replaced wholesale, never patched in place
//! - No lock is held while listeners run, so listeners may read or dispatch
//! - Subscriptions are RAII handles; dropping one unsubscribes

pub mod actions;
pub mod hydration;
pub mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

pub use actions::{Action, reduce};
pub use state::{AppState, CurrentUserState, NavigationState, Post, PostsState, User};

type Listener = Arc<dyn Fn(&Store) + Send + Sync>;

struct Inner {
    state: RwLock<Arc<AppState>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

/// Holder of the current snapshot. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Create a store, resuming from `initial` when given.
    pub fn new(initial: Option<AppState>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(initial.unwrap_or_default())),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<AppState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply an action, publish the new snapshot and notify subscribers.
    pub fn dispatch(&self, action: Action) -> Arc<AppState> {
        let next = {
            let mut current = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let next = Arc::new(reduce(&current, action));
            *current = next.clone();
            next
        };

        self.notify();
        next
    }

    /// Register a change listener. It runs after every dispatch until the
    /// returned handle is dropped or `unsubscribe`d.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Store) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self) {
        // Snapshot the list so listeners can (un)subscribe while we iterate.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in listeners {
            listener(self);
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Teardown handle for a store listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_dispatch_replaces_snapshot() {
        let store = Store::new(None);
        let before = store.state();
        let after = store.dispatch(Action::PostsRequested);

        assert!(!before.posts.loading);
        assert!(after.posts.loading);
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &store.state()));
    }

    #[test]
    fn test_seeded_store_resumes_state() {
        let mut prior = AppState::default();
        prior.posts.error = Some("stale".into());
        let store = Store::new(Some(prior.clone()));
        assert_eq!(*store.state(), prior);
    }

    #[test]
    fn test_listeners_run_after_every_dispatch() {
        let store = Store::new(None);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let _sub = store.subscribe(move |s| {
            // The new snapshot is already visible.
            assert!(s.state().posts.loading);
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(Action::PostsRequested);
        store.dispatch(Action::PostsRequested);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = Store::new(None);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let sub = store.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(Action::SignedOut);
        sub.unsubscribe();
        store.dispatch(Action::SignedOut);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_may_dispatch() {
        let store = Store::new(None);
        let _sub = store.subscribe(|s| {
            if s.state().posts.loading {
                s.dispatch(Action::PostsLoaded(Vec::new()));
            }
        });

        store.dispatch(Action::PostsRequested);
        assert!(!store.state().posts.loading);
    }

    #[test]
    fn test_clones_share_state() {
        let a = Store::new(None);
        let b = a.clone();
        b.dispatch(Action::PostsRequested);
        assert!(a.state().posts.loading);
    }
}
