//! A single project in a list; the drag source.

use projboard_core::drag::{DragPayload, DRAG_FORMAT};
use projboard_core::Project;
use tracing::{debug, warn};

use crate::component::{acquire_root, Anchor, Component, Host};
use crate::dom::{DragEffect, Dom, EventKind, InsertPosition, NodeId};
use crate::error::UiResult;

pub const ITEM_TEMPLATE: &str = "single-project";

/// Renders one project and announces it when dragged.
///
/// The item never changes the store: a drag only says which project is
/// moving, the list it lands on performs the move.
pub struct ProjectItem {
    dom: Dom,
    root: NodeId,
    project: Project,
}

impl ProjectItem {
    /// Attach a new item at the end of `host`.
    pub fn new(dom: &Dom, host: impl Into<Host>, project: Project) -> UiResult<Self> {
        let anchor = Anchor::new(ITEM_TEMPLATE, host, InsertPosition::BeforeEnd).with_element_id(project.id());
        let root = acquire_root(dom, &anchor)?;
        dom.set_attr(root, "draggable", "true")?;

        let item = Self {
            dom: dom.clone(),
            root,
            project,
        };
        item.configure()?;
        item.render()?;
        Ok(item)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn configure(&self) -> UiResult<()> {
        let project_id = self.project.id().to_string();
        self.dom.on(self.root, EventKind::DragStart, move |event| {
            let Some(transfer) = event.data_transfer.as_mut() else {
                warn!(project_id = %project_id, "Drag started without a data transfer");
                return;
            };
            match DragPayload::move_project(project_id.as_str()).encode() {
                Ok(raw) => {
                    transfer.set_data(DRAG_FORMAT, raw);
                    transfer.effect_allowed = DragEffect::Move;
                    debug!(project_id = %project_id, "Drag started");
                }
                Err(e) => warn!(project_id = %project_id, error = %e, "Could not encode drag payload"),
            }
        })?;

        let project_id = self.project.id().to_string();
        self.dom.on(self.root, EventKind::DragEnd, move |event| {
            let effect = event.data_transfer.as_ref().map(|t| t.drop_effect).unwrap_or_default();
            debug!(project_id = %project_id, effect = ?effect, "Drag ended");
        })?;
        Ok(())
    }
}

impl Component for ProjectItem {
    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&self) -> UiResult<()> {
        let title = self.dom.require(self.root, "h2")?;
        let people = self.dom.require(self.root, "h3")?;
        let description = self.dom.require(self.root, "p")?;
        self.dom.set_text(title, self.project.title())?;
        self.dom.set_text(people, &format!("{} assigned", self.project.persons()))?;
        self.dom.set_text(description, self.project.description())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DataTransfer, Event, ElementSpec};
    use crate::error::UiError;

    fn host() -> Dom {
        let dom = Dom::builtin().unwrap();
        let app = dom.get_by_id("app").unwrap();
        let list = dom.materialize_at("project-list", app, InsertPosition::BeforeEnd).unwrap();
        let ul = dom.require(list, "ul").unwrap();
        dom.set_element_id(ul, "items").unwrap();
        dom
    }

    #[test]
    fn test_renders_project() {
        let dom = host();
        let item = ProjectItem::new(&dom, "items", Project::new("p-1", "Build API", "v1", 3)).unwrap();
        let root = item.root();
        assert_eq!(dom.element_id(root).unwrap().as_deref(), Some("p-1"));
        assert_eq!(dom.attr(root, "draggable").unwrap().as_deref(), Some("true"));
        assert_eq!(dom.text(dom.require(root, "h2").unwrap()).unwrap(), "Build API");
        assert_eq!(dom.text(dom.require(root, "h3").unwrap()).unwrap(), "3 persons assigned");
        assert_eq!(dom.text(dom.require(root, "p").unwrap()).unwrap(), "v1");
    }

    #[test]
    fn test_single_person() {
        let dom = host();
        let item = ProjectItem::new(&dom, "items", Project::new("p-1", "Solo", "d", 1)).unwrap();
        let h3 = dom.require(item.root(), "h3").unwrap();
        assert_eq!(dom.text(h3).unwrap(), "1 person assigned");
    }

    #[test]
    fn test_drag_start_sets_payload() {
        let dom = host();
        let item = ProjectItem::new(&dom, "items", Project::new("p-9", "t", "d", 2)).unwrap();

        let event = dom
            .dispatch(item.root(), Event::with_transfer(EventKind::DragStart, DataTransfer::new()))
            .unwrap();
        let transfer = event.data_transfer.unwrap();
        assert_eq!(transfer.effect_allowed, DragEffect::Move);
        let payload = DragPayload::decode(transfer.get_data(DRAG_FORMAT).unwrap()).unwrap();
        assert_eq!(payload.project_id(), "p-9");
    }

    #[test]
    fn test_incomplete_template_fails() {
        let dom = host();
        dom.register_template(ITEM_TEMPLATE, vec![ElementSpec::new("li").with_child(ElementSpec::new("h2"))])
            .unwrap();
        let result = ProjectItem::new(&dom, "items", Project::new("p-1", "t", "d", 1));
        assert!(matches!(result, Err(UiError::ElementNotFound { .. })));
    }
}
