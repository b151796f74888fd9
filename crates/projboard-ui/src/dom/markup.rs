//! Declarative document markup.
//!
//! A markup file is TOML: `[[body]]` lists the host elements of the page,
//! `[[templates]]` lists named templates whose first `content` element is
//! cloned on every materialization.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{UiError, UiResult};

/// Built-in page: an `app` host plus the input, list and item templates.
pub const DEFAULT_MARKUP: &str = include_str!("../../templates/index.toml");

/// Elements rendered without a closing tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// One element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub class: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Reject tag or attribute names that could not be written out as markup.
    pub fn check(&self) -> UiResult<()> {
        if !is_markup_name(&self.tag) {
            return Err(UiError::InvalidName(self.tag.clone()));
        }
        if let Some(name) = self.attrs.keys().find(|name| !is_markup_name(name)) {
            return Err(UiError::InvalidName(name.clone()));
        }
        self.children.iter().try_for_each(ElementSpec::check)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSpec {
    pub id: String,
    #[serde(default)]
    pub content: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markup {
    pub body: Vec<ElementSpec>,
    pub templates: Vec<TemplateSpec>,
}

impl Markup {
    pub fn parse(raw: &str) -> UiResult<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Tag and attribute names: an ASCII letter, then letters, digits, `-`, `_`, `:` or `.`.
pub(crate) fn is_markup_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}
