//! Drag payload carried from a project item to a project list.
//!
//! The platform channel is a single string per data format. The payload is
//! encoded as a tagged JSON record so a target can reject anything that
//! was not produced by a project item.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Data format the payload is stored under.
pub const DRAG_FORMAT: &str = "text/plain";

/// What a drag gesture carries.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DragPayload {
    /// Move a project to the status of whichever list it is dropped on.
    MoveProject {
        #[serde(rename = "projectId")]
        project_id: String,
    },
}

impl DragPayload {
    pub fn move_project(project_id: impl Into<String>) -> Self {
        Self::MoveProject {
            project_id: project_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        match self {
            Self::MoveProject { project_id } => project_id,
        }
    }

    /// Serialize for the transfer channel.
    pub fn encode(&self) -> BoardResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a transfer string, rejecting anything that is not a payload.
    pub fn decode(raw: &str) -> BoardResult<Self> {
        let payload: Self = serde_json::from_str(raw)
            .map_err(|e| BoardError::invalid_payload(format!("{}: {}", e, raw)))?;
        if payload.project_id().trim().is_empty() {
            return Err(BoardError::invalid_payload("empty project id"));
        }
        Ok(payload)
    }
}
