//! Centralized error types for the project board.

use thiserror::Error;

use crate::project::model::ProjectStatus;
use crate::validation::ValidationError;

/// Main error type for board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project id already in use: {0}")]
    DuplicateId(String),

    #[error("Project '{id}' is already {status}")]
    StatusUnchanged { id: String, status: ProjectStatus },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown project status: {0}")]
    UnknownStatus(String),

    #[error("Invalid drag payload: {0}")]
    InvalidPayload(String),

    #[error("Store mutated while notifying subscribers")]
    Reentrant,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

impl BoardError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid payload error.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Whether this error is the idempotent "status unchanged" case.
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::StatusUnchanged { .. })
    }
}
