//! Error types for views and the render substrate.

use projboard_core::BoardError;
use thiserror::Error;

use crate::dom::NodeId;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template has no element: {0}")]
    EmptyTemplate(String),

    #[error("Host element not found: {0}")]
    HostNotFound(String),

    #[error("Cannot insert beside {0}: element has no parent")]
    NoParent(NodeId),

    #[error("No element matching '{selector}' under {root}")]
    ElementNotFound { root: NodeId, selector: String },

    #[error("Invalid tag or attribute name: '{0}'")]
    InvalidName(String),

    #[error("Node {0} is no longer in the document")]
    DetachedNode(NodeId),

    #[error("Markup error: {0}")]
    Markup(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Board(#[from] BoardError),
}

pub type UiResult<T> = Result<T, UiError>;
