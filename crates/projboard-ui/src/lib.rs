//! Projboard UI
//!
//! Views over a [`projboard_core::ProjectStore`], rendered into a headless
//! document built from declarative templates.

pub mod app;
pub mod component;
pub mod dnd;
pub mod dom;
pub mod error;
pub mod input;
pub mod item;
pub mod list;

pub use app::App;
pub use component::{acquire_root, Anchor, Component, Host};
pub use dnd::{DragSession, DropOutcome};
pub use dom::{DataTransfer, DragEffect, Dom, Event, EventKind, InsertPosition, NodeId, WeakDom};
pub use error::{UiError, UiResult};
pub use input::{Field, ProjectInput};
pub use item::ProjectItem;
pub use list::{DragSignal, DropIndicator, ProjectList};
