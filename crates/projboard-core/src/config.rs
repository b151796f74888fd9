//! Board configuration.
//!
//! Built-in defaults, optionally overridden by a TOML file and then by
//! `PROJBOARD_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{BoardError, BoardResult};
use crate::validation::ValidationConfig;

/// Default id of the element views attach to.
pub const DEFAULT_HOST: &str = "app";

/// Environment variable overriding the template markup file.
pub const ENV_TEMPLATES: &str = "PROJBOARD_TEMPLATES";

/// Environment variable overriding the host element id.
pub const ENV_HOST: &str = "PROJBOARD_HOST";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Rules applied to the new-project form.
    pub validation: ValidationConfig,
    /// Markup file replacing the built-in templates.
    pub templates: Option<PathBuf>,
    /// Id of the host container.
    pub host: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            templates: None,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl BoardConfig {
    /// Load configuration from an optional file plus the process environment.
    pub fn load(path: Option<&Path>) -> BoardResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> BoardResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading board config");
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> BoardResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(templates) = lookup(ENV_TEMPLATES).filter(|v| !v.trim().is_empty()) {
            self.templates = Some(PathBuf::from(templates));
        }
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
    }

    fn check(&self) -> BoardResult<()> {
        if self.host.trim().is_empty() {
            return Err(BoardError::config("host must not be empty"));
        }
        let people = &self.validation.people;
        if let (Some(min), Some(max)) = (people.min, people.max) {
            if min > max {
                return Err(BoardError::config(format!(
                    "people.min ({}) is greater than people.max ({})",
                    min, max
                )));
            }
        }
        for (field, rule) in [("title", &self.validation.title), ("description", &self.validation.description)] {
            if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
                if min > max {
                    return Err(BoardError::config(format!(
                        "{}.min_length ({}) is greater than {}.max_length ({})",
                        field, min, field, max
                    )));
                }
            }
        }
        Ok(())
    }
}
