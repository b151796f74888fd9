//! View lifecycle shared by the input, list and item views.

use crate::dom::{Dom, InsertPosition, NodeId};
use crate::error::UiResult;

/// Element a view attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// Looked up by id attribute when the root is acquired.
    Id(String),
    /// A node the caller already holds, such as a parent view's own element.
    Node(NodeId),
}

impl From<&str> for Host {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for Host {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<NodeId> for Host {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Where a view's root comes from and where it is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub template_id: String,
    pub host: Host,
    pub position: InsertPosition,
    /// Id given to the new root element, if any.
    pub element_id: Option<String>,
}

impl Anchor {
    pub fn new(template_id: impl Into<String>, host: impl Into<Host>, position: InsertPosition) -> Self {
        Self {
            template_id: template_id.into(),
            host: host.into(),
            position,
            element_id: None,
        }
    }

    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }
}

/// Materialize the anchor's template into its host and return the new root.
///
/// A missing template or host is an integrity failure: the view cannot be
/// built and the error should abort startup.
pub fn acquire_root(dom: &Dom, anchor: &Anchor) -> UiResult<NodeId> {
    let root = match &anchor.host {
        Host::Id(id) => dom.materialize(&anchor.template_id, id, anchor.position)?,
        Host::Node(node) => dom.materialize_at(&anchor.template_id, *node, anchor.position)?,
    };
    if let Some(id) = &anchor.element_id {
        dom.set_element_id(root, id)?;
    }
    Ok(root)
}

/// A view attached to the document.
pub trait Component {
    /// Root element acquired at construction.
    fn root(&self) -> NodeId;

    /// Populate the root's content. Rendering again replaces what the
    /// previous render produced.
    fn render(&self) -> UiResult<()>;
}
