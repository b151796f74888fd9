//! Project domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Project status (the list a project is shown in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Done,
}

impl ProjectStatus {
    /// All statuses, in board order.
    pub const ALL: [ProjectStatus; 2] = [Self::Active, Self::Done];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Done => "done",
        }
    }

    /// Name used for list element ids and headings.
    pub fn list_name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Done => "finished",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "done" | "finished" => Ok(Self::Done),
            other => Err(BoardError::UnknownStatus(other.to_string())),
        }
    }
}

/// A tracked project.
///
/// Everything except `status` is fixed at construction. Status changes
/// only go through [`crate::ProjectStore::move_project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: String,
    title: String,
    description: String,
    people: u32,
    status: ProjectStatus,
}

impl Project {
    /// Create a new active project.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn people(&self) -> u32 {
        self.people
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// People count with the right noun: "1 person", "3 persons".
    pub fn persons(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}
