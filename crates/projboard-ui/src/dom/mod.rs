//! Headless render substrate.
//!
//! A [`Dom`] is a shared handle to one document: an element tree rooted at
//! an implicit `body`, a set of named templates, per-element event
//! handlers and a log of user-visible notices.
//!
//! Every method borrows the document only for its own duration, so event
//! handlers and store listeners are free to call back into the `Dom`.

mod event;
mod markup;

pub use event::{DataTransfer, DragEffect, Event, EventKind, TransferMode};
pub use markup::{ElementSpec, Markup, TemplateSpec, DEFAULT_MARKUP};

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;
use std::rc::{Rc, Weak};

use html_escape::{encode_safe, encode_text};
use tracing::{debug, warn};

use crate::error::{UiError, UiResult};
use markup::{is_markup_name, VOID_ELEMENTS};

/// Element handle. Ids are never reused within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Where an inserted element goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the anchor, as its previous sibling.
    BeforeBegin,
    /// Inside the anchor, before its first child.
    AfterBegin,
    /// Inside the anchor, after its last child.
    BeforeEnd,
    /// After the anchor, as its next sibling.
    AfterEnd,
}

pub type Handler = Rc<dyn Fn(&mut Event)>;

struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    handlers: Vec<(EventKind, Handler)>,
}

impl Node {
    fn from_spec(spec: &ElementSpec) -> Self {
        Self {
            tag: spec.tag.clone(),
            id: spec.id.clone(),
            classes: spec.class.clone(),
            attrs: spec.attrs.clone(),
            text: spec.text.clone(),
            value: None,
            parent: None,
            children: Vec::new(),
            handlers: Vec::new(),
        }
    }
}

struct Document {
    nodes: HashMap<NodeId, Node>,
    next_node: u64,
    body: NodeId,
    templates: HashMap<String, ElementSpec>,
    notices: Vec<String>,
    page_reloads: usize,
}

impl Document {
    fn new() -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            next_node: 0,
            body: NodeId(0),
            templates: HashMap::new(),
            notices: Vec::new(),
            page_reloads: 0,
        };
        doc.body = doc.alloc(Node::from_spec(&ElementSpec::new("body")));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, node);
        id
    }

    fn node(&self, id: NodeId) -> UiResult<&Node> {
        self.nodes.get(&id).ok_or(UiError::DetachedNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> UiResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(UiError::DetachedNode(id))
    }

    /// Build a detached subtree from a spec.
    fn build(&mut self, spec: &ElementSpec) -> NodeId {
        let id = self.alloc(Node::from_spec(spec));
        for child in &spec.children {
            let child_id = self.build(child);
            if let Some(node) = self.nodes.get_mut(&child_id) {
                node.parent = Some(id);
            }
            if let Some(node) = self.nodes.get_mut(&id) {
                node.children.push(child_id);
            }
        }
        id
    }

    fn insert(&mut self, anchor: NodeId, position: InsertPosition, node: NodeId) -> UiResult<()> {
        let (parent, index) = match position {
            InsertPosition::AfterBegin => (anchor, 0),
            InsertPosition::BeforeEnd => (anchor, self.node(anchor)?.children.len()),
            InsertPosition::BeforeBegin | InsertPosition::AfterEnd => {
                let parent = self.node(anchor)?.parent.ok_or(UiError::NoParent(anchor))?;
                let siblings = &self.node(parent)?.children;
                let at = siblings
                    .iter()
                    .position(|c| *c == anchor)
                    .ok_or(UiError::DetachedNode(anchor))?;
                let index = if position == InsertPosition::BeforeBegin { at } else { at + 1 };
                (parent, index)
            }
        };
        self.node_mut(parent)?.children.insert(index, node);
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// Drop a node and its descendants from the arena.
    fn free(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.free(child);
            }
        }
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(&root) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if let Some(wanted) = selector.strip_prefix('#') {
            node.id.as_deref() == Some(wanted)
        } else if let Some(wanted) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == wanted)
        } else {
            node.tag.eq_ignore_ascii_case(selector)
        }
    }

    fn write_html(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, node.tag);
        if let Some(el_id) = &node.id {
            let _ = write!(out, " id=\"{}\"", encode_safe(el_id));
        }
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", encode_safe(&node.classes.join(" ")));
        }
        for (name, value) in &node.attrs {
            let _ = write!(out, " {}=\"{}\"", name, encode_safe(value));
        }
        if let Some(value) = &node.value {
            let _ = write!(out, " value=\"{}\"", encode_safe(value));
        }

        if VOID_ELEMENTS.contains(&node.tag.as_str()) {
            out.push_str(" />\n");
            return;
        }
        out.push('>');

        let text = node.text.as_deref().map(encode_text).unwrap_or_default();
        if node.children.is_empty() {
            let _ = writeln!(out, "{}</{}>", text, node.tag);
            return;
        }
        out.push_str(&text);
        out.push('\n');
        for child in &node.children {
            self.write_html(*child, depth + 1, out);
        }
        let _ = writeln!(out, "{}</{}>", indent, node.tag);
    }
}

/// Shared handle to a document.
#[derive(Clone)]
pub struct Dom {
    doc: Rc<RefCell<Document>>,
}

/// Non-owning handle, held by event handlers stored inside the document.
#[derive(Clone)]
pub struct WeakDom {
    doc: Weak<RefCell<Document>>,
}

impl WeakDom {
    pub fn upgrade(&self) -> Option<Dom> {
        self.doc.upgrade().map(|doc| Dom { doc })
    }
}

impl Dom {
    /// An empty document with no hosts or templates.
    pub fn new() -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document::new())),
        }
    }

    /// Build a document from markup text.
    pub fn from_markup(raw: &str) -> UiResult<Self> {
        let markup = Markup::parse(raw)?;
        let dom = Self::new();
        {
            let mut doc = dom.doc.borrow_mut();
            let body = doc.body;
            for spec in &markup.body {
                spec.check()?;
                let node = doc.build(spec);
                doc.insert(body, InsertPosition::BeforeEnd, node)?;
            }
        }
        for template in markup.templates {
            dom.register_template(&template.id, template.content)?;
        }
        debug!(nodes = dom.node_count(), "Document built from markup");
        Ok(dom)
    }

    /// Build a document from a markup file.
    pub fn from_file(path: &Path) -> UiResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_markup(&raw)
    }

    /// The built-in page.
    pub fn builtin() -> UiResult<Self> {
        Self::from_markup(DEFAULT_MARKUP)
    }

    pub fn downgrade(&self) -> WeakDom {
        WeakDom {
            doc: Rc::downgrade(&self.doc),
        }
    }

    /// Register a template; its first element is what gets cloned.
    pub fn register_template(&self, id: &str, content: Vec<ElementSpec>) -> UiResult<()> {
        let first = content
            .into_iter()
            .next()
            .ok_or_else(|| UiError::EmptyTemplate(id.to_string()))?;
        first.check()?;
        self.doc.borrow_mut().templates.insert(id.to_string(), first);
        Ok(())
    }

    pub fn body(&self) -> NodeId {
        self.doc.borrow().body
    }

    /// Find an attached element by its id attribute.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        let body = doc.body;
        doc.descendants(body)
            .into_iter()
            .find(|n| doc.nodes.get(n).and_then(|node| node.id.as_deref()) == Some(id))
    }

    /// Clone template `template_id` and insert it relative to the element named `host_id`.
    pub fn materialize(&self, template_id: &str, host_id: &str, position: InsertPosition) -> UiResult<NodeId> {
        let host = self
            .get_by_id(host_id)
            .ok_or_else(|| UiError::HostNotFound(host_id.to_string()))?;
        self.materialize_at(template_id, host, position)
    }

    /// Clone template `template_id` and insert it relative to `anchor`.
    pub fn materialize_at(&self, template_id: &str, anchor: NodeId, position: InsertPosition) -> UiResult<NodeId> {
        let mut doc = self.doc.borrow_mut();
        doc.node(anchor)?;
        let spec = doc
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| UiError::TemplateNotFound(template_id.to_string()))?;
        let node = doc.build(&spec);
        if let Err(e) = doc.insert(anchor, position, node) {
            doc.free(node);
            return Err(e);
        }
        debug!(template = template_id, node = %node, "Template materialized");
        Ok(node)
    }

    /// First descendant of `root` matching `#id`, `.class` or a tag name.
    pub fn query(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        doc.descendants(root).into_iter().find(|n| doc.matches(*n, selector))
    }

    /// Like [`Dom::query`], failing when nothing matches.
    pub fn require(&self, root: NodeId, selector: &str) -> UiResult<NodeId> {
        self.query(root, selector).ok_or_else(|| UiError::ElementNotFound {
            root,
            selector: selector.to_string(),
        })
    }

    pub fn tag(&self, node: NodeId) -> UiResult<String> {
        Ok(self.doc.borrow().node(node)?.tag.clone())
    }

    pub fn element_id(&self, node: NodeId) -> UiResult<Option<String>> {
        Ok(self.doc.borrow().node(node)?.id.clone())
    }

    pub fn set_element_id(&self, node: NodeId, id: &str) -> UiResult<()> {
        self.doc.borrow_mut().node_mut(node)?.id = Some(id.to_string());
        Ok(())
    }

    pub fn text(&self, node: NodeId) -> UiResult<String> {
        Ok(self.doc.borrow().node(node)?.text.clone().unwrap_or_default())
    }

    pub fn set_text(&self, node: NodeId, text: &str) -> UiResult<()> {
        self.doc.borrow_mut().node_mut(node)?.text = Some(text.to_string());
        Ok(())
    }

    /// Current value of a form control.
    pub fn value(&self, node: NodeId) -> UiResult<String> {
        Ok(self.doc.borrow().node(node)?.value.clone().unwrap_or_default())
    }

    pub fn set_value(&self, node: NodeId, value: &str) -> UiResult<()> {
        let mut doc = self.doc.borrow_mut();
        let node = doc.node_mut(node)?;
        node.value = if value.is_empty() { None } else { Some(value.to_string()) };
        Ok(())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> UiResult<Option<String>> {
        Ok(self.doc.borrow().node(node)?.attrs.get(name).cloned())
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) -> UiResult<()> {
        if !is_markup_name(name) {
            return Err(UiError::InvalidName(name.to_string()));
        }
        self.doc
            .borrow_mut()
            .node_mut(node)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Add a class; adding one already present changes nothing.
    pub fn add_class(&self, node: NodeId, class: &str) -> UiResult<()> {
        let mut doc = self.doc.borrow_mut();
        let node = doc.node_mut(node)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&self, node: NodeId, class: &str) -> UiResult<()> {
        self.doc.borrow_mut().node_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> UiResult<bool> {
        Ok(self.doc.borrow().node(node)?.classes.iter().any(|c| c == class))
    }

    pub fn parent(&self, node: NodeId) -> UiResult<Option<NodeId>> {
        Ok(self.doc.borrow().node(node)?.parent)
    }

    pub fn children(&self, node: NodeId) -> UiResult<Vec<NodeId>> {
        Ok(self.doc.borrow().node(node)?.children.clone())
    }

    /// Remove and discard every child of `node`, handlers included.
    pub fn clear_children(&self, node: NodeId) -> UiResult<()> {
        let mut doc = self.doc.borrow_mut();
        let children = std::mem::take(&mut doc.node_mut(node)?.children);
        for child in children {
            doc.free(child);
        }
        Ok(())
    }

    /// Detach and discard `node` and its subtree.
    pub fn remove(&self, node: NodeId) -> UiResult<()> {
        let mut doc = self.doc.borrow_mut();
        let parent = doc.node(node)?.parent;
        if let Some(parent) = parent {
            doc.node_mut(parent)?.children.retain(|c| *c != node);
        }
        doc.free(node);
        Ok(())
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.doc.borrow().nodes.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.doc.borrow().nodes.len()
    }

    /// Register a reaction to `kind` on `node`.
    pub fn on<F>(&self, node: NodeId, kind: EventKind, handler: F) -> UiResult<()>
    where
        F: Fn(&mut Event) + 'static,
    {
        self.doc
            .borrow_mut()
            .node_mut(node)?
            .handlers
            .push((kind, Rc::new(handler)));
        Ok(())
    }

    /// Deliver `event` to `target` and then to each ancestor.
    ///
    /// Handlers are collected before any runs, so a handler may freely
    /// mutate the document. Returns the event for the caller to inspect.
    pub fn dispatch(&self, target: NodeId, mut event: Event) -> UiResult<Event> {
        let path: Vec<(NodeId, Vec<Handler>)> = {
            let doc = self.doc.borrow();
            doc.node(target)?;
            let mut path = Vec::new();
            let mut current = Some(target);
            while let Some(id) = current {
                let Some(node) = doc.nodes.get(&id) else {
                    break;
                };
                let handlers: Vec<Handler> = node
                    .handlers
                    .iter()
                    .filter(|(kind, _)| *kind == event.kind())
                    .map(|(_, handler)| Rc::clone(handler))
                    .collect();
                if !handlers.is_empty() {
                    path.push((id, handlers));
                }
                current = node.parent;
            }
            path
        };

        event.set_target(target);
        for (node, handlers) in path {
            event.set_current_target(node);
            for handler in handlers {
                handler(&mut event);
            }
            if event.propagation_stopped() {
                break;
            }
        }

        if event.kind() == EventKind::Submit && !event.default_prevented() {
            warn!(target = %target, "Form submitted without prevent_default; page would reload");
            self.doc.borrow_mut().page_reloads += 1;
        }
        Ok(event)
    }

    /// Show a blocking notice to the user.
    pub fn alert(&self, message: &str) {
        warn!(message = %message, "User notice");
        self.doc.borrow_mut().notices.push(message.to_string());
    }

    pub fn notices(&self) -> Vec<String> {
        self.doc.borrow().notices.clone()
    }

    pub fn take_notices(&self) -> Vec<String> {
        std::mem::take(&mut self.doc.borrow_mut().notices)
    }

    /// Number of submits whose default full-page navigation was not prevented.
    pub fn page_reloads(&self) -> usize {
        self.doc.borrow().page_reloads
    }

    /// Render `node` and its subtree as indented HTML.
    pub fn to_html(&self, node: NodeId) -> UiResult<String> {
        let doc = self.doc.borrow();
        doc.node(node)?;
        let mut out = String::new();
        doc.write_html(node, 0, &mut out);
        Ok(out)
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.doc.borrow();
        f.debug_struct("Dom")
            .field("nodes", &doc.nodes.len())
            .field("templates", &doc.templates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn dom() -> Dom {
        Dom::from_markup(
            r#"
            [[body]]
            tag = "div"
            id = "app"

            [[body.children]]
            tag = "p"
            id = "marker"

            [[templates]]
            id = "box"

            [[templates.content]]
            tag = "section"

            [[templates.content.children]]
            tag = "h2"
            id = "heading"
            "#,
        )
        .unwrap()
    }

    fn tags_under(dom: &Dom, node: NodeId) -> Vec<String> {
        dom.children(node)
            .unwrap()
            .into_iter()
            .map(|c| dom.tag(c).unwrap())
            .collect()
    }

    #[test]
    fn test_insert_positions() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        let marker = dom.get_by_id("marker").unwrap();

        let first = dom.materialize("box", "app", InsertPosition::AfterBegin).unwrap();
        let last = dom.materialize("box", "app", InsertPosition::BeforeEnd).unwrap();
        let children = dom.children(app).unwrap();
        assert_eq!(children, vec![first, marker, last]);

        let before = dom.materialize("box", "marker", InsertPosition::BeforeBegin).unwrap();
        let after = dom.materialize("box", "marker", InsertPosition::AfterEnd).unwrap();
        assert_eq!(dom.children(app).unwrap(), vec![first, before, marker, after, last]);
        assert_eq!(tags_under(&dom, app), vec!["section", "section", "p", "section", "section"]);
    }

    #[test]
    fn test_missing_template_or_host() {
        let dom = dom();
        assert!(matches!(
            dom.materialize("nope", "app", InsertPosition::BeforeEnd),
            Err(UiError::TemplateNotFound(_))
        ));
        assert!(matches!(
            dom.materialize("box", "nowhere", InsertPosition::BeforeEnd),
            Err(UiError::HostNotFound(_))
        ));
    }

    #[test]
    fn test_sibling_insert_needs_parent() {
        let dom = dom();
        let body = dom.body();
        let before = dom.node_count();
        assert!(matches!(
            dom.materialize_at("box", body, InsertPosition::BeforeBegin),
            Err(UiError::NoParent(_))
        ));
        assert_eq!(dom.node_count(), before);
    }

    #[test]
    fn test_clones_are_independent() {
        let dom = dom();
        let a = dom.materialize("box", "app", InsertPosition::BeforeEnd).unwrap();
        let b = dom.materialize("box", "app", InsertPosition::BeforeEnd).unwrap();
        let heading_a = dom.require(a, "#heading").unwrap();
        dom.set_text(heading_a, "first").unwrap();
        let heading_b = dom.require(b, "h2").unwrap();
        assert_eq!(dom.text(heading_b).unwrap(), "");
    }

    #[test]
    fn test_require_reports_selector() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        let err = dom.require(app, ".missing").unwrap_err();
        assert!(matches!(err, UiError::ElementNotFound { ref selector, .. } if selector == ".missing"));
    }

    #[test]
    fn test_classes_are_idempotent() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        dom.add_class(app, "droppable").unwrap();
        dom.add_class(app, "droppable").unwrap();
        assert!(dom.to_html(app).unwrap().starts_with("<div id=\"app\" class=\"droppable\">"));
        dom.remove_class(app, "droppable").unwrap();
        assert!(!dom.has_class(app, "droppable").unwrap());
    }

    #[test]
    fn test_clear_children_frees_nodes() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        let section = dom.materialize("box", "app", InsertPosition::BeforeEnd).unwrap();
        dom.clear_children(app).unwrap();
        assert!(dom.children(app).unwrap().is_empty());
        assert!(!dom.contains(section));
        assert!(matches!(dom.text(section), Err(UiError::DetachedNode(_))));
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        let section = dom.materialize("box", "app", InsertPosition::BeforeEnd).unwrap();
        let heading = dom.require(section, "h2").unwrap();
        assert_eq!(dom.parent(section).unwrap(), Some(app));

        dom.remove(section).unwrap();
        assert!(!dom.contains(heading));
        assert_eq!(dom.children(app).unwrap().len(), 1);
        assert!(dom.get_by_id("heading").is_none());
    }

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        let marker = dom.get_by_id("marker").unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));

        for node in [marker, app] {
            let hits = Rc::clone(&hits);
            dom.on(node, EventKind::DragOver, move |event| {
                hits.borrow_mut().push(event.current_target());
            })
            .unwrap();
        }

        let event = dom.dispatch(marker, Event::new(EventKind::DragOver)).unwrap();
        assert_eq!(event.target(), Some(marker));
        assert_eq!(*hits.borrow(), vec![Some(marker), Some(app)]);
    }

    #[test]
    fn test_stop_propagation() {
        let dom = dom();
        let app = dom.get_by_id("app").unwrap();
        let marker = dom.get_by_id("marker").unwrap();
        let outer = Rc::new(Cell::new(false));
        dom.on(marker, EventKind::Drop, |event| event.stop_propagation()).unwrap();
        let flag = Rc::clone(&outer);
        dom.on(app, EventKind::Drop, move |_| flag.set(true)).unwrap();

        dom.dispatch(marker, Event::new(EventKind::Drop)).unwrap();
        assert!(!outer.get());
    }

    #[test]
    fn test_handlers_may_mutate_document() {
        let dom = dom();
        let marker = dom.get_by_id("marker").unwrap();
        let weak = dom.downgrade();
        dom.on(marker, EventKind::DragEnter, move |event| {
            if let (Some(dom), Some(node)) = (weak.upgrade(), event.current_target()) {
                dom.set_text(node, "entered").unwrap();
            }
        })
        .unwrap();

        dom.dispatch(marker, Event::new(EventKind::DragEnter)).unwrap();
        assert_eq!(dom.text(marker).unwrap(), "entered");
    }

    #[test]
    fn test_unprevented_submit_counts_reload() {
        let dom = dom();
        let marker = dom.get_by_id("marker").unwrap();
        dom.dispatch(marker, Event::new(EventKind::Submit)).unwrap();
        assert_eq!(dom.page_reloads(), 1);
    }

    #[test]
    fn test_to_html_escapes() {
        let dom = dom();
        let marker = dom.get_by_id("marker").unwrap();
        dom.set_text(marker, "a < b").unwrap();
        assert_eq!(dom.to_html(marker).unwrap(), "<p id=\"marker\">a &lt; b</p>\n");
    }

    #[test]
    fn test_to_html_escapes_attribute_values() {
        let dom = dom();
        let marker = dom.get_by_id("marker").unwrap();
        dom.set_attr(marker, "title", "it's \"quoted\" <b>").unwrap();
        let html = dom.to_html(marker).unwrap();
        let rendered = html.split("title=\"").nth(1).unwrap().split('"').next().unwrap();
        assert!(!rendered.contains('\''));
        assert!(!rendered.contains('<'));
        assert!(html.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_set_attr_rejects_bad_name() {
        let dom = dom();
        let marker = dom.get_by_id("marker").unwrap();
        let result = dom.set_attr(marker, "onclick=\"x\" data", "1");
        assert!(matches!(result, Err(UiError::InvalidName(_))));
        assert_eq!(dom.attr(marker, "onclick").unwrap(), None);
    }

    #[test]
    fn test_empty_template_rejected() {
        let dom = Dom::new();
        assert!(matches!(
            dom.register_template("blank", Vec::new()),
            Err(UiError::EmptyTemplate(_))
        ));
    }
}
