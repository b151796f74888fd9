//! New-project form.

use projboard_core::{BoardError, Project, ProjectForm, ProjectStore, ValidationConfig};
use tracing::{error, info};

use crate::component::{acquire_root, Anchor, Component};
use crate::dom::{Dom, Event, EventKind, InsertPosition, NodeId, WeakDom};
use crate::error::{UiError, UiResult};

pub const INPUT_TEMPLATE: &str = "project-input";

/// Id given to the form element.
pub const INPUT_ELEMENT_ID: &str = "user-input";

/// Form field a value can be typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    People,
}

impl Field {
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Title => "#title",
            Self::Description => "#description",
            Self::People => "#people",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "description" | "desc" => Some(Self::Description),
            "people" => Some(Self::People),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Fields {
    title: NodeId,
    description: NodeId,
    people: NodeId,
}

impl Fields {
    fn get(&self, field: Field) -> NodeId {
        match field {
            Field::Title => self.title,
            Field::Description => self.description,
            Field::People => self.people,
        }
    }

    fn read(&self, dom: &Dom) -> UiResult<ProjectForm> {
        Ok(ProjectForm::new(
            dom.value(self.title)?,
            dom.value(self.description)?,
            dom.value(self.people)?,
        ))
    }

    fn clear(&self, dom: &Dom) -> UiResult<()> {
        for node in [self.title, self.description, self.people] {
            dom.set_value(node, "")?;
        }
        Ok(())
    }
}

/// Reads the form on submit and adds the project to the store.
pub struct ProjectInput {
    dom: Dom,
    root: NodeId,
    fields: Fields,
}

impl ProjectInput {
    /// Attach the form at the start of `host_id`.
    pub fn new(dom: &Dom, store: &ProjectStore, rules: ValidationConfig, host_id: &str) -> UiResult<Self> {
        let anchor = Anchor::new(INPUT_TEMPLATE, host_id, InsertPosition::AfterBegin).with_element_id(INPUT_ELEMENT_ID);
        let root = acquire_root(dom, &anchor)?;
        let fields = Fields {
            title: dom.require(root, Field::Title.selector())?,
            description: dom.require(root, Field::Description.selector())?,
            people: dom.require(root, Field::People.selector())?,
        };

        let weak = dom.downgrade();
        let store = store.clone();
        dom.on(root, EventKind::Submit, move |event| {
            submit_handler(&weak, &store, &rules, fields, event);
        })?;

        let input = Self {
            dom: dom.clone(),
            root,
            fields,
        };
        input.render()?;
        Ok(input)
    }

    /// Set what the user typed into `field`.
    pub fn fill(&self, field: Field, value: &str) -> UiResult<()> {
        self.dom.set_value(self.fields.get(field), value)
    }

    pub fn value(&self, field: Field) -> UiResult<String> {
        self.dom.value(self.fields.get(field))
    }

    /// Fire the form's submit event, as pressing the button would.
    pub fn submit(&self) -> UiResult<()> {
        self.dom.dispatch(self.root, Event::new(EventKind::Submit))?;
        Ok(())
    }
}

impl Component for ProjectInput {
    fn root(&self) -> NodeId {
        self.root
    }

    /// Show the form with every field empty.
    fn render(&self) -> UiResult<()> {
        self.fields.clear(&self.dom)
    }
}

fn submit_handler(weak: &WeakDom, store: &ProjectStore, rules: &ValidationConfig, fields: Fields, event: &mut Event) {
    event.prevent_default();
    let Some(dom) = weak.upgrade() else {
        return;
    };

    match submit_form(&dom, store, rules, fields) {
        Ok(project) => info!(project_id = %project.id(), "Project submitted"),
        Err(UiError::Board(BoardError::Validation(e))) => {
            dom.alert(&format!("Invalid input, please try again! {}", e));
        }
        Err(e) => error!(error = %e, "Project submission failed"),
    }
}

/// Validate then add immediately; fields are cleared only on success.
fn submit_form(dom: &Dom, store: &ProjectStore, rules: &ValidationConfig, fields: Fields) -> UiResult<Project> {
    let form = fields.read(dom)?;
    let new = form.validate(rules).map_err(BoardError::from)?;
    let project = store.add_project(&new.title, &new.description, new.people)?;
    fields.clear(dom)?;
    Ok(project)
}
