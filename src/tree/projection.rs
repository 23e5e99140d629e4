//! Mirroring store snapshots onto the tree.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::store::{AppState, CurrentUserState, NavigationState, PostsState, Store};

/// The values components read, one per state domain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeProps {
    pub current_user: CurrentUserState,
    pub posts: PostsState,
    pub navigation: NavigationState,
}

impl TreeProps {
    /// Replace every domain with the matching one from `snapshot`.
    pub fn replace_from(&mut self, snapshot: &AppState) {
        // Exhaustive destructuring: a new domain on AppState fails to compile
        // here until it is projected too.
        let AppState {
            current_user,
            posts,
            navigation,
        } = snapshot;

        self.current_user = current_user.clone();
        self.posts = posts.clone();
        self.navigation = navigation.clone();
    }
}

impl From<&AppState> for TreeProps {
    fn from(snapshot: &AppState) -> Self {
        let mut props = TreeProps::default();
        props.replace_from(snapshot);
        props
    }
}

/// Re-read the store's snapshot and replace the mirrored values wholesale.
pub fn project(store: &Store, props: &RwLock<TreeProps>, projections: &AtomicU64) {
    let snapshot = store.state();
    props
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace_from(&snapshot);
    projections.fetch_add(1, Ordering::Relaxed);
}
