//! Snapshot transfer between the server-rendered document and the browser.
//!
//! The server embeds `window.__state=<json>;` in the page; the browser reads
//! the JSON back and seeds its store with it.

use crate::store::state::AppState;

/// Name of the global the document assigns the snapshot to.
pub const STATE_GLOBAL: &str = "window.__state";

/// Serialize a snapshot for embedding inside a `<script>` element.
///
/// `<` is written as `\u003c` so the payload can never contain `</script>`.
pub fn to_script_json(state: &AppState) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(state)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Full assignment statement, e.g. `window.__state={...};`.
pub fn to_script(state: &AppState) -> Result<String, serde_json::Error> {
    Ok(format!("{}={};", STATE_GLOBAL, to_script_json(state)?))
}

/// Parse a snapshot previously produced by [`to_script_json`].
pub fn from_json(json: &str) -> Result<AppState, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::state::Post;

    #[test]
    fn test_script_json_cannot_close_script_element() {
        let mut state = AppState::default();
        state.posts.items.push(Post {
            id: 1,
            title: "</script><script>alert(1)</script>".into(),
            body: String::new(),
            author: String::new(),
        });

        let json = to_script_json(&state).unwrap();
        assert!(!json.contains("</script>"));

        // Still valid JSON decoding to the same text.
        let back = from_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_script_assigns_global() {
        let script = to_script(&AppState::default()).unwrap();
        assert!(script.starts_with("window.__state={"));
        assert!(script.ends_with("};"));
    }
}
