//! Form validation rules for new projects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be a whole number")]
    NotANumber { field: &'static str },

    #[error("{field} must be at least {min}")]
    BelowMin { field: &'static str, min: i64 },

    #[error("{field} must be at most {max}")]
    AboveMax { field: &'static str, max: i64 },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::NotANumber { field }
            | Self::BelowMin { field, .. }
            | Self::AboveMax { field, .. } => field,
        }
    }
}

/// Constraints for one form field.
///
/// Length limits count characters of the trimmed value; `min`/`max` apply
/// to numeric fields only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl FieldRule {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Check a text value, returning it trimmed.
    pub fn check_text<'a>(&self, field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return if self.required {
                Err(ValidationError::Required { field })
            } else {
                Ok(value)
            };
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(ValidationError::TooShort { field, min });
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(ValidationError::TooLong { field, max });
            }
        }
        Ok(value)
    }

    /// Check a numeric value given as raw field text.
    pub fn check_number(&self, field: &'static str, value: &str) -> Result<Option<i64>, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return if self.required {
                Err(ValidationError::Required { field })
            } else {
                Ok(None)
            };
        }

        let number: i64 = value
            .parse()
            .map_err(|_| ValidationError::NotANumber { field })?;
        if let Some(min) = self.min {
            if number < min {
                return Err(ValidationError::BelowMin { field, min });
            }
        }
        if let Some(max) = self.max {
            if number > max {
                return Err(ValidationError::AboveMax { field, max });
            }
        }
        Ok(Some(number))
    }
}

/// Rules for the three project form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub title: FieldRule,
    pub description: FieldRule,
    pub people: FieldRule,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            title: FieldRule::required(),
            description: FieldRule::required(),
            people: FieldRule {
                min: Some(1),
                ..FieldRule::required()
            },
        }
    }
}

/// Raw values read from the project form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub people: String,
}

/// A form that passed validation, ready for [`crate::ProjectStore::add_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub people: u32,
}

impl ProjectForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }

    /// Validate all fields, reporting the first failure in form order.
    ///
    /// Title and description are never empty and people is a strictly
    /// positive count, whatever the configured rules relax.
    pub fn validate(&self, rules: &ValidationConfig) -> Result<NewProject, ValidationError> {
        let title = non_empty("title", rules.title.check_text("title", &self.title)?)?;
        let description = non_empty(
            "description",
            rules.description.check_text("description", &self.description)?,
        )?;
        let people = rules
            .people
            .check_number("people", &self.people)?
            .ok_or(ValidationError::Required { field: "people" })?;

        if people < 1 {
            return Err(ValidationError::BelowMin { field: "people", min: 1 });
        }
        let people = u32::try_from(people).map_err(|_| ValidationError::AboveMax {
            field: "people",
            max: i64::from(u32::MAX),
        })?;

        Ok(NewProject {
            title: title.to_string(),
            description: description.to_string(),
            people,
        })
    }
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ValidationConfig {
        ValidationConfig::default()
    }

    #[test]
    fn test_valid_form() {
        let form = ProjectForm::new("Build API", "v1", "3");
        let project = form.validate(&rules()).unwrap();
        assert_eq!(project.title, "Build API");
        assert_eq!(project.people, 3);
    }

    #[test]
    fn test_values_are_trimmed() {
        let form = ProjectForm::new("  Build API ", "\tv1\n", " 3 ");
        let project = form.validate(&rules()).unwrap();
        assert_eq!(project.title, "Build API");
        assert_eq!(project.description, "v1");
    }

    #[test]
    fn test_missing_fields() {
        let err = ProjectForm::new("", "v1", "3").validate(&rules()).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "title" });

        let err = ProjectForm::new("t", "   ", "3").validate(&rules()).unwrap_err();
        assert_eq!(err.field(), "description");

        let err = ProjectForm::new("t", "d", "").validate(&rules()).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "people" });
    }

    #[test]
    fn test_people_must_be_positive_integer() {
        let err = ProjectForm::new("t", "d", "0").validate(&rules()).unwrap_err();
        assert_eq!(err, ValidationError::BelowMin { field: "people", min: 1 });

        let err = ProjectForm::new("t", "d", "-4").validate(&rules()).unwrap_err();
        assert_eq!(err.field(), "people");

        let err = ProjectForm::new("t", "d", "2.5").validate(&rules()).unwrap_err();
        assert_eq!(err, ValidationError::NotANumber { field: "people" });

        let err = ProjectForm::new("t", "d", "many").validate(&rules()).unwrap_err();
        assert_eq!(err, ValidationError::NotANumber { field: "people" });
    }

    #[test]
    fn test_positive_people_enforced_even_without_rule() {
        let mut rules = rules();
        rules.people.min = None;
        let err = ProjectForm::new("t", "d", "0").validate(&rules).unwrap_err();
        assert_eq!(err, ValidationError::BelowMin { field: "people", min: 1 });
    }

    #[test]
    fn test_length_and_range_rules() {
        let mut rules = rules();
        rules.description.min_length = Some(5);
        rules.title.max_length = Some(4);
        rules.people.max = Some(5);

        let err = ProjectForm::new("t", "tiny", "1").validate(&rules).unwrap_err();
        assert_eq!(err, ValidationError::TooShort { field: "description", min: 5 });

        let err = ProjectForm::new("title", "long enough", "1").validate(&rules).unwrap_err();
        assert_eq!(err, ValidationError::TooLong { field: "title", max: 4 });

        let err = ProjectForm::new("t", "long enough", "6").validate(&rules).unwrap_err();
        assert_eq!(err, ValidationError::AboveMax { field: "people", max: 5 });
    }

    #[test]
    fn test_text_stays_mandatory_when_rule_relaxed() {
        let mut rules = rules();
        rules.description.required = false;
        assert!(rules.description.check_text("description", "").is_ok());

        let err = ProjectForm::new("t", "", "2").validate(&rules).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "description" });
    }
}
