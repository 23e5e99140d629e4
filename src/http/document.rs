//! Full HTML document around the rendered application.

use crate::config::AppConfig;
use crate::store::{AppState, hydration};
use crate::ui::node::{Node, el, raw};
use crate::ui::RenderError;

/// Side navigation layout tweaks for the materialize theme.
const INLINE_STYLE: &str = r#"
#slide-out a { height: 40px; line-height: 40px; }
header, main, footer { padding-left: 240px; }
@media only screen and (max-width : 992px) {
  header, main, footer { padding-left: 0; }
}
"#;

/// Initialize the collapsible side navigation once the DOM is ready.
const INLINE_SCRIPT: &str = r#"
$(function() { $(".button-collapse").sideNav(); });
"#;

/// Static parts of every page, resolved once from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShell {
    title: String,
    stylesheets: Vec<String>,
    scripts: Vec<String>,
    client_script: String,
}

impl DocumentShell {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            title: config.document.title.clone(),
            stylesheets: config.document.stylesheets.clone(),
            scripts: config.document.scripts.clone(),
            client_script: config.client_script_url(),
        }
    }

    pub fn client_script(&self) -> &str {
        &self.client_script
    }

    /// Assemble `<!doctype html>` + document with `markup` inside
    /// `#content` and `state` embedded for hydration.
    pub fn render(&self, markup: &str, state: &AppState) -> Result<String, RenderError> {
        let state_script = hydration::to_script(state)?;

        let head = el("head")
            .child(el("title").text(self.title.as_str()))
            .child(el("meta").attr("charset", "utf-8"))
            .child(
                el("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1.0"),
            )
            .children(self.stylesheets.iter().map(|href| {
                el("link")
                    .attr("rel", "stylesheet")
                    .attr("href", href.as_str())
                    .attr("media", "screen,projection")
            }))
            .children(
                self.scripts
                    .iter()
                    .map(|src| el("script").attr("type", "text/javascript").attr("src", src.as_str())),
            )
            .child(el("script").child(raw(INLINE_SCRIPT)))
            .child(el("style").child(raw(INLINE_STYLE)));

        let body = el("body")
            .class("teal")
            .child(el("div").attr("id", "content").child(raw(markup)))
            .child(el("script").child(raw(state_script)))
            .child(el("script").attr("src", self.client_script.as_str()));

        let html: Node = el("html").child(head).child(body).into();
        Ok(format!("<!doctype html>\n{}", html.render_to_string()))
    }
}
