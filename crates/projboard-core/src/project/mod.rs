//! Project records and identifier generation.

pub mod ids;
pub mod model;

pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use model::{Project, ProjectStatus};
