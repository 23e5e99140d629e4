//! Application state snapshot.
//!
//! One field per state domain. A snapshot is never edited after the store
//! publishes it; the reducer always builds a fresh value.

use serde::{Deserialize, Serialize};

use crate::routing::Route;

/// The whole application state at a point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    /// Session domain: the signed-in user, if any.
    pub current_user: CurrentUserState,

    /// Post list domain.
    pub posts: PostsState,

    /// Last route the router resolved.
    pub navigation: NavigationState,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUserState {
    pub user: Option<User>,
}

/// A single post as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsState {
    pub items: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PostsState {
    /// Look up a loaded post by id.
    pub fn find(&self, id: u64) -> Option<&Post> {
        self.items.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationState {
    /// `None` until the first parse.
    pub route: Option<Route>,
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_keys_are_camel_case() {
        let value = serde_json::to_value(AppState::default()).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("currentUser"));
        assert!(object.contains_key("posts"));
        assert!(object.contains_key("navigation"));
        assert_eq!(object.len(), 3);
    }

    #[test]
    fn test_missing_domains_fall_back_to_defaults() {
        let state: AppState = serde_json::from_str(r#"{"posts":{"loading":true}}"#).unwrap();
        assert!(state.posts.loading);
        assert!(state.posts.items.is_empty());
        assert_eq!(state.current_user, CurrentUserState::default());
        assert_eq!(state.navigation.route, None);
    }
}
