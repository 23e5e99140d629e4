//! Virtual nodes and HTML string rendering.

use std::fmt::Write;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Escaped on output.
    Text(String),
    /// Written verbatim (pre-rendered markup, inline scripts).
    Raw(String),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

/// Start building an element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

pub fn raw(value: impl Into<String>) -> Node {
    Node::Raw(value.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(value) => escape_into(value, false, out),
            Node::Raw(value) => out.push_str(value),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out);
                }
            }
            Node::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {}=\"", name);
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

fn escape_into(value: &str, attribute: bool, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_elements() {
        let node: Node = el("ul")
            .class("list")
            .child(el("li").text("one"))
            .child(el("li").text("two"))
            .into();
        assert_eq!(
            node.render_to_string(),
            r#"<ul class="list"><li>one</li><li>two</li></ul>"#
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let node: Node = el("a")
            .attr("title", r#"say "hi" & 'bye'"#)
            .text("<b>bold</b>")
            .into();
        assert_eq!(
            node.render_to_string(),
            r#"<a title="say &quot;hi&quot; &amp; &#39;bye&#39;">&lt;b&gt;bold&lt;/b&gt;</a>"#
        );
    }

    #[test]
    fn test_raw_is_verbatim_and_void_has_no_close() {
        let node: Node = el("div")
            .child(el("meta").attr("charset", "utf-8"))
            .child(raw("<p>ok</p>"))
            .into();
        assert_eq!(node.render_to_string(), r#"<div><meta charset="utf-8"><p>ok</p></div>"#);
    }
}
