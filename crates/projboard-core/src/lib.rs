//! Projboard Core Library
//!
//! Project records, the observable project store and the rules every view
//! relies on: validation, drag payloads and configuration.

pub mod config;
pub mod drag;
pub mod error;
pub mod project;
pub mod store;
pub mod validation;

pub use config::BoardConfig;
pub use drag::DragPayload;
pub use error::{BoardError, BoardResult};
pub use project::model::{Project, ProjectStatus};
pub use project::ids::{IdGenerator, SequentialIds, UuidIds};
pub use store::{Listener, NotifyReport, ProjectStore, Snapshot, SubscriptionId};
pub use validation::{FieldRule, NewProject, ProjectForm, ValidationConfig, ValidationError};
