//! UI components and string rendering.
//!
//! # Data Flow
//! ```text
//! TreeProps (mirrored store snapshot)
//!     → components.rs (App → Navigation + page for the current route)
//!     → node.rs (virtual nodes → HTML string)
//! ```
//!
//! # Design Decisions
//! - Components are plain structs borrowing their props
//! - Prop validation is opt-in per render (strict on the server)
//! - No diffing or live DOM here; the browser bundle owns patching

pub mod components;
pub mod node;

pub use components::App;
pub use node::{Element, Node, el, raw, text};

use crate::tree::TreeProps;

/// Error type for rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid props for <{component}>: {reason}")]
    InvalidProps {
        component: &'static str,
        reason: String,
    },
    #[error("no root component mounted")]
    NotMounted,
    #[error("failed to serialize state: {0}")]
    State(#[from] serde_json::Error),
}

/// A renderable piece of UI.
pub trait Component {
    /// Name used in validation errors.
    fn name(&self) -> &'static str;

    /// Check props before rendering. Only called when validation is enabled.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn render(&self, cx: &RenderContext<'_>) -> Result<Node, RenderError>;
}

/// What every component can see while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    props: &'a TreeProps,
    validate_props: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(props: &'a TreeProps, validate_props: bool) -> Self {
        Self { props, validate_props }
    }

    pub fn props(&self) -> &'a TreeProps {
        self.props
    }

    /// Render a child, validating its props first when enabled.
    pub fn render<C: Component + ?Sized>(&self, component: &C) -> Result<Node, RenderError> {
        if self.validate_props {
            component.validate().map_err(|reason| RenderError::InvalidProps {
                component: component.name(),
                reason,
            })?;
        }
        component.render(self)
    }
}
