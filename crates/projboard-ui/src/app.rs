//! Wires the store, the form and both status lists into one page.

use std::rc::Rc;

use projboard_core::{BoardConfig, BoardError, ProjectStatus, ProjectStore};
use tracing::info;

use crate::component::Component;
use crate::dnd::{DragSession, DropOutcome};
use crate::dom::{Dom, NodeId};
use crate::error::{UiError, UiResult};
use crate::input::ProjectInput;
use crate::list::ProjectList;

/// The running board: one store shared by every view.
pub struct App {
    dom: Dom,
    store: ProjectStore,
    input: ProjectInput,
    lists: Vec<Rc<ProjectList>>,
}

impl App {
    /// Build the page described by `config` around a fresh store.
    pub fn from_config(config: &BoardConfig) -> UiResult<Self> {
        let dom = match &config.templates {
            Some(path) => Dom::from_file(path)?,
            None => Dom::builtin()?,
        };
        Self::bootstrap(dom, ProjectStore::new(), config)
    }

    /// Attach the form and one list per status to `config.host`.
    pub fn bootstrap(dom: Dom, store: ProjectStore, config: &BoardConfig) -> UiResult<Self> {
        let input = ProjectInput::new(&dom, &store, config.validation.clone(), &config.host)?;
        let lists = ProjectStatus::ALL
            .iter()
            .map(|status| ProjectList::new(&dom, &store, &config.host, *status))
            .collect::<UiResult<Vec<_>>>()?;

        info!(host = %config.host, lists = lists.len(), "Board attached");
        Ok(Self {
            dom,
            store,
            input,
            lists,
        })
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn lists(&self) -> &[Rc<ProjectList>] {
        &self.lists
    }

    pub fn list(&self, status: ProjectStatus) -> Option<&Rc<ProjectList>> {
        self.lists.iter().find(|l| l.status() == status)
    }

    /// Rendered item for `project_id`, searched only among the lists' own items.
    pub fn item_root(&self, project_id: &str) -> UiResult<NodeId> {
        self.lists
            .iter()
            .find_map(|list| list.item_root(project_id))
            .ok_or_else(|| BoardError::ProjectNotFound(project_id.to_string()).into())
    }

    /// Drag the rendered item for `project_id` onto the `status` list.
    pub fn drag_project(&self, project_id: &str, status: ProjectStatus) -> UiResult<DropOutcome> {
        let source = self.item_root(project_id)?;
        let target = self
            .list(status)
            .ok_or_else(|| UiError::HostNotFound(format!("{}-projects", status.list_name())))?
            .root();
        DragSession::drag_to(&self.dom, source, target)
    }

    /// The whole document as HTML.
    pub fn html(&self) -> UiResult<String> {
        self.dom.to_html(self.dom.body())
    }
}
