//! Project list for one status; the drop target.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use projboard_core::drag::{DragPayload, DRAG_FORMAT};
use projboard_core::{BoardError, Project, ProjectStatus, ProjectStore, Snapshot, SubscriptionId};
use tracing::{debug, info, warn};

use crate::component::{acquire_root, Anchor, Component};
use crate::dom::{DragEffect, Dom, Event, EventKind, InsertPosition, NodeId};
use crate::error::{UiError, UiResult};
use crate::item::ProjectItem;

pub const LIST_TEMPLATE: &str = "project-list";

/// Class carried by the list element while a project hovers over it.
pub const DROPPABLE_CLASS: &str = "droppable";

/// Visual drop affordance of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropIndicator {
    #[default]
    Idle,
    Droppable,
}

/// Drag signals that drive the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSignal {
    Over,
    Leave,
    Drop,
}

impl DropIndicator {
    pub fn next(self, signal: DragSignal) -> Self {
        match signal {
            DragSignal::Over => Self::Droppable,
            DragSignal::Leave | DragSignal::Drop => Self::Idle,
        }
    }
}

/// Shows the projects with one status, in store order.
pub struct ProjectList {
    dom: Dom,
    store: ProjectStore,
    status: ProjectStatus,
    root: NodeId,
    list: NodeId,
    assigned: RefCell<Vec<Project>>,
    items: RefCell<Vec<ProjectItem>>,
    indicator: Cell<DropIndicator>,
    subscription: Cell<Option<SubscriptionId>>,
}

impl ProjectList {
    /// Attach a list at the end of `host_id` and subscribe it to `store`.
    pub fn new(dom: &Dom, store: &ProjectStore, host_id: &str, status: ProjectStatus) -> UiResult<Rc<Self>> {
        let name = status.list_name();
        let anchor = Anchor::new(LIST_TEMPLATE, host_id, InsertPosition::BeforeEnd)
            .with_element_id(format!("{}-projects", name));
        let root = acquire_root(dom, &anchor)?;

        let list = dom.require(root, "ul")?;
        dom.set_element_id(list, &format!("{}-projects-list", name))?;
        let heading = dom.require(root, "h2")?;
        dom.set_text(heading, &format!("{} PROJECTS", name.to_uppercase()))?;

        let view = Rc::new(Self {
            dom: dom.clone(),
            store: store.clone(),
            status,
            root,
            list,
            assigned: RefCell::new(store.snapshot().with_status(status).cloned().collect()),
            items: RefCell::new(Vec::new()),
            indicator: Cell::new(DropIndicator::Idle),
            subscription: Cell::new(None),
        });
        Self::configure(&view)?;

        let weak = Rc::downgrade(&view);
        let subscription = store.subscribe(move |snapshot| match weak.upgrade() {
            Some(view) => view.on_projects(snapshot).map_err(anyhow::Error::from),
            None => Ok(()),
        });
        view.subscription.set(Some(subscription));

        view.render()?;
        Ok(view)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// The `ul` holding the items.
    pub fn list_element(&self) -> NodeId {
        self.list
    }

    pub fn indicator(&self) -> DropIndicator {
        self.indicator.get()
    }

    /// Projects currently shown.
    pub fn projects(&self) -> Vec<Project> {
        self.assigned.borrow().clone()
    }

    pub fn item_count(&self) -> usize {
        self.items.borrow().len()
    }

    /// Root of the rendered item for `project_id`, if this list shows it.
    pub fn item_root(&self, project_id: &str) -> Option<NodeId> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.project().id() == project_id)
            .map(Component::root)
    }

    /// Stop receiving store updates. Also done when the view is dropped,
    /// which detaches its section as well.
    pub fn unsubscribe(&self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
    }

    fn on_projects(&self, snapshot: Snapshot) -> UiResult<()> {
        *self.assigned.borrow_mut() = snapshot.with_status(self.status).cloned().collect();
        self.render()
    }

    fn configure(view: &Rc<Self>) -> UiResult<()> {
        let dom = &view.dom;
        for kind in [EventKind::DragEnter, EventKind::DragOver] {
            let weak = Rc::downgrade(view);
            dom.on(view.root, kind, move |event| {
                if let Some(view) = weak.upgrade() {
                    view.on_drag_over(event);
                }
            })?;
        }

        let weak: Weak<Self> = Rc::downgrade(view);
        dom.on(view.root, EventKind::DragLeave, move |_| {
            if let Some(view) = weak.upgrade() {
                view.signal(DragSignal::Leave);
            }
        })?;

        let weak = Rc::downgrade(view);
        dom.on(view.root, EventKind::Drop, move |event| {
            if let Some(view) = weak.upgrade() {
                view.on_drop(event);
            }
        })?;
        Ok(())
    }

    /// Accept the drag only if it carries a project payload.
    fn on_drag_over(&self, event: &mut Event) {
        let carries_project = event
            .data_transfer
            .as_ref()
            .is_some_and(|t| t.has_type(DRAG_FORMAT) && t.effect_allowed.permits(DragEffect::Move));
        if !carries_project {
            return;
        }
        event.prevent_default();
        if let Some(transfer) = event.data_transfer.as_mut() {
            transfer.drop_effect = DragEffect::Move;
        }
        self.signal(DragSignal::Over);
    }

    fn on_drop(&self, event: &mut Event) {
        event.prevent_default();
        match self.commit_drop(event) {
            Ok(()) => {}
            Err(UiError::Board(e)) if e.is_no_op() => {
                debug!(status = %self.status, "Dropped onto its own list");
            }
            Err(e) => warn!(status = %self.status, error = %e, "Drop rejected"),
        }
        self.signal(DragSignal::Drop);
    }

    fn commit_drop(&self, event: &Event) -> UiResult<()> {
        let raw = event
            .data_transfer
            .as_ref()
            .and_then(|t| t.get_data(DRAG_FORMAT))
            .ok_or_else(|| BoardError::invalid_payload("no project data in drop"))?;
        let payload = DragPayload::decode(raw)?;
        let project = self.store.move_project(payload.project_id(), self.status)?;
        info!(project_id = %project.id(), status = %self.status, "Project dropped");
        Ok(())
    }

    fn signal(&self, signal: DragSignal) {
        let next = self.indicator.get().next(signal);
        self.indicator.set(next);
        let result = match next {
            DropIndicator::Droppable => self.dom.add_class(self.list, DROPPABLE_CLASS),
            DropIndicator::Idle => self.dom.remove_class(self.list, DROPPABLE_CLASS),
        };
        if let Err(e) = result {
            warn!(status = %self.status, error = %e, "Could not update drop indicator");
        }
    }
}

impl Component for ProjectList {
    fn root(&self) -> NodeId {
        self.root
    }

    /// Rebuild the items from the projects last delivered by the store.
    fn render(&self) -> UiResult<()> {
        self.dom.clear_children(self.list)?;
        let mut items = self.items.borrow_mut();
        items.clear();
        for project in self.assigned.borrow().iter() {
            items.push(ProjectItem::new(&self.dom, self.list, project.clone())?);
        }
        debug!(status = %self.status, items = items.len(), "List rendered");
        Ok(())
    }
}

impl Drop for ProjectList {
    fn drop(&mut self) {
        self.unsubscribe();
        if let Err(e) = self.dom.remove(self.root) {
            debug!(status = %self.status, error = %e, "List root already detached");
        }
    }
}
