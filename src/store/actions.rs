//! Actions and the reducer that turns them into new snapshots.

use crate::api::{ApiClient, ApiError};
use crate::routing::Route;
use crate::store::state::{AppState, Post, User};
use crate::store::Store;

/// Every state transition the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SignedIn(User),
    SignedOut,
    PostsRequested,
    PostsLoaded(Vec<Post>),
    PostsFailed(String),
    RouteMatched { route: Route, path: String },
}

/// Pure reducer: previous snapshot + action -> next snapshot.
///
/// Domains the action does not touch are carried over as clones, so the
/// result is always a complete, independent value.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SignedIn(user) => {
            next.current_user.user = Some(user);
        }
        Action::SignedOut => {
            next.current_user.user = None;
        }
        Action::PostsRequested => {
            next.posts.loading = true;
            next.posts.error = None;
        }
        Action::PostsLoaded(items) => {
            next.posts.items = items;
            next.posts.loading = false;
            next.posts.error = None;
        }
        Action::PostsFailed(error) => {
            next.posts.loading = false;
            next.posts.error = Some(error);
        }
        Action::RouteMatched { route, path } => {
            next.navigation.route = Some(route);
            next.navigation.path = Some(path);
        }
    }
    next
}

/// Fetch the post list through the API client and record the outcome.
pub async fn load_posts(api: &ApiClient, store: &Store) -> Result<(), ApiError> {
    store.dispatch(Action::PostsRequested);

    match api.get::<Vec<Post>>("posts").await {
        Ok(posts) => {
            tracing::debug!(count = posts.len(), "Posts loaded");
            store.dispatch(Action::PostsLoaded(posts));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load posts");
            store.dispatch(Action::PostsFailed(e.to_string()));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("Post {}", id),
            body: String::new(),
            author: "ada".into(),
        }
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let before = AppState::default();
        let after = reduce(&before, Action::PostsLoaded(vec![post(1)]));

        assert!(before.posts.items.is_empty());
        assert_eq!(after.posts.items.len(), 1);
    }

    #[test]
    fn test_posts_lifecycle() {
        let state = reduce(&AppState::default(), Action::PostsRequested);
        assert!(state.posts.loading);

        let state = reduce(&state, Action::PostsFailed("boom".into()));
        assert!(!state.posts.loading);
        assert_eq!(state.posts.error.as_deref(), Some("boom"));

        let state = reduce(&state, Action::PostsRequested);
        assert_eq!(state.posts.error, None);

        let state = reduce(&state, Action::PostsLoaded(vec![post(1), post(2)]));
        assert!(!state.posts.loading);
        assert_eq!(state.posts.find(2).map(|p| p.id), Some(2));
    }

    #[test]
    fn test_sign_in_and_out() {
        let user = User { id: 7, name: "Grace".into(), email: None };
        let state = reduce(&AppState::default(), Action::SignedIn(user.clone()));
        assert_eq!(state.current_user.user, Some(user));

        let state = reduce(&state, Action::SignedOut);
        assert_eq!(state.current_user.user, None);
    }

    #[test]
    fn test_route_matched_records_path() {
        let state = reduce(
            &AppState::default(),
            Action::RouteMatched { route: Route::Posts, path: "/posts".into() },
        );
        assert_eq!(state.navigation.route, Some(Route::Posts));
        assert_eq!(state.navigation.path.as_deref(), Some("/posts"));
    }
}
