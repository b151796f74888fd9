//! Observable project store.
//!
//! The store owns the ordered project sequence and the subscriber list.
//! Every successful mutation notifies all subscribers, in subscription
//! order, with a snapshot of the full sequence. A status change never
//! reorders projects.
//!
//! The store is single-threaded: handles are cheap `Rc` clones handed to
//! every view that needs it.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::{BoardError, BoardResult};
use crate::project::ids::{IdGenerator, UuidIds};
use crate::project::model::{Project, ProjectStatus};
use crate::validation::ValidationError;

/// Callback invoked with a snapshot after every mutation.
pub type Listener = Rc<dyn Fn(Snapshot) -> anyhow::Result<()>>;

/// Handle returned by [`ProjectStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Read-only copy of the project sequence at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    projects: Rc<[Project]>,
}

impl Snapshot {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects with the given status, in store order.
    pub fn with_status(&self, status: ProjectStatus) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |p| p.status() == status)
    }

    /// An owned copy the caller is free to change.
    pub fn to_vec(&self) -> Vec<Project> {
        self.projects.to_vec()
    }
}

impl Deref for Snapshot {
    type Target = [Project];

    fn deref(&self) -> &Self::Target {
        &self.projects
    }
}

/// Outcome of one notification cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: Vec<SubscriptionId>,
}

impl NotifyReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

struct StoreInner {
    projects: RefCell<Vec<Project>>,
    listeners: RefCell<BTreeMap<SubscriptionId, Listener>>,
    next_subscription: Cell<u64>,
    notifying: Cell<bool>,
    last_report: RefCell<Option<NotifyReport>>,
    ids: Box<dyn IdGenerator>,
}

/// Shared handle to the project store.
#[derive(Clone)]
pub struct ProjectStore {
    inner: Rc<StoreInner>,
}

impl ProjectStore {
    /// Create an empty store that assigns UUID identifiers.
    pub fn new() -> Self {
        Self::with_ids(UuidIds)
    }

    /// Create an empty store with a custom identifier source.
    pub fn with_ids(ids: impl IdGenerator + 'static) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                projects: RefCell::new(Vec::new()),
                listeners: RefCell::new(BTreeMap::new()),
                next_subscription: Cell::new(1),
                notifying: Cell::new(false),
                last_report: RefCell::new(None),
                ids: Box::new(ids),
            }),
        }
    }

    /// Append a new active project and notify subscribers.
    pub fn add_project(&self, title: &str, description: &str, people: u32) -> BoardResult<Project> {
        self.ensure_idle()?;
        if title.trim().is_empty() {
            return Err(ValidationError::Required { field: "title" }.into());
        }
        if description.trim().is_empty() {
            return Err(ValidationError::Required { field: "description" }.into());
        }
        if people == 0 {
            return Err(ValidationError::BelowMin { field: "people", min: 1 }.into());
        }

        let id = self.inner.ids.next_id();
        let project = {
            let mut projects = self.inner.projects.borrow_mut();
            if projects.iter().any(|p| p.id() == id) {
                return Err(BoardError::DuplicateId(id));
            }
            let project = Project::new(id, title, description, people);
            projects.push(project.clone());
            project
        };

        info!(project_id = %project.id(), title = %project.title(), "Project added");
        self.notify();
        Ok(project)
    }

    /// Change a project's status and notify subscribers.
    ///
    /// Moving a project to the status it already has fails with
    /// [`BoardError::StatusUnchanged`] and notifies nobody.
    pub fn move_project(&self, id: &str, status: ProjectStatus) -> BoardResult<Project> {
        self.ensure_idle()?;
        let project = {
            let mut projects = self.inner.projects.borrow_mut();
            let project = projects
                .iter_mut()
                .find(|p| p.id() == id)
                .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))?;
            if project.status() == status {
                return Err(BoardError::StatusUnchanged {
                    id: id.to_string(),
                    status,
                });
            }
            project.set_status(status);
            project.clone()
        };

        info!(project_id = %id, status = %status, "Project moved");
        self.notify();
        Ok(project)
    }

    /// Register a listener for every future mutation.
    ///
    /// Current state is not replayed; call [`ProjectStore::snapshot`] for that.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Snapshot) -> anyhow::Result<()> + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.listeners.borrow_mut().insert(id, Rc::new(listener));
        debug!(subscription = %id, "Subscriber registered");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.listeners.borrow_mut().remove(&id).is_some();
        if removed {
            debug!(subscription = %id, "Subscriber removed");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Current projects, in insertion order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            projects: self.inner.projects.borrow().iter().cloned().collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<Project> {
        self.inner.projects.borrow().iter().find(|p| p.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Report from the most recent notification cycle, if any ran.
    pub fn last_report(&self) -> Option<NotifyReport> {
        self.inner.last_report.borrow().clone()
    }

    fn ensure_idle(&self) -> BoardResult<()> {
        if self.inner.notifying.get() {
            warn!("Store mutation attempted from a subscriber");
            return Err(BoardError::Reentrant);
        }
        Ok(())
    }

    /// Deliver a fresh snapshot to every listener.
    ///
    /// A failing listener is logged and skipped; the rest still run.
    fn notify(&self) -> NotifyReport {
        let snapshot = self.snapshot();
        let listeners: Vec<(SubscriptionId, Listener)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        let _guard = NotifyingGuard::enter(&self.inner.notifying);
        let mut report = NotifyReport::default();
        for (id, listener) in listeners {
            // An earlier listener may have unsubscribed this one.
            if !self.inner.listeners.borrow().contains_key(&id) {
                continue;
            }
            match listener(snapshot.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(subscription = %id, error = %e, "Subscriber failed, continuing");
                    report.failed.push(id);
                }
            }
        }

        debug!(
            delivered = report.delivered,
            failed = report.failed.len(),
            projects = snapshot.len(),
            "Subscribers notified"
        );
        *self.inner.last_report.borrow_mut() = Some(report.clone());
        report
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.inner.projects.borrow().len())
            .field("subscribers", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Marks the store as notifying until dropped, including on unwind.
struct NotifyingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> NotifyingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
