//! End-to-end board behaviour: form submit, list updates and drag-and-drop.

use std::cell::Cell;
use std::rc::Rc;

use projboard_core::{BoardConfig, IdGenerator, ProjectStatus, ProjectStore, SequentialIds};
use projboard_ui::list::DROPPABLE_CLASS;
use projboard_ui::{App, Component, DragSession, DropIndicator, DropOutcome, Dom, Field};

fn app() -> App {
    let store = ProjectStore::with_ids(SequentialIds::new("p"));
    App::bootstrap(Dom::builtin().unwrap(), store, &BoardConfig::default()).unwrap()
}

fn submit(app: &App, title: &str, description: &str, people: &str) {
    let input = app.input();
    input.fill(Field::Title, title).unwrap();
    input.fill(Field::Description, description).unwrap();
    input.fill(Field::People, people).unwrap();
    input.submit().unwrap();
}

fn item_texts(app: &App, status: ProjectStatus) -> Vec<String> {
    let dom = app.dom();
    let list = app.list(status).unwrap().list_element();
    dom.children(list)
        .unwrap()
        .into_iter()
        .map(|li| dom.text(dom.require(li, "h3").unwrap()).unwrap())
        .collect()
}

/// Counts renders of a list by watching its store notifications.
fn count_notifications(store: &ProjectStore) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    store.subscribe(move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    count
}

#[test]
fn page_layout_follows_attach_order() {
    let app = app();
    let dom = app.dom();
    let host = dom.get_by_id("app").unwrap();
    let ids: Vec<Option<String>> = dom
        .children(host)
        .unwrap()
        .into_iter()
        .map(|c| dom.element_id(c).unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            Some("user-input".to_string()),
            Some("active-projects".to_string()),
            Some("finished-projects".to_string())
        ]
    );
}

#[test]
fn adding_a_project_updates_both_lists() {
    let app = app();
    submit(&app, "Build API", "v1", "3");

    assert_eq!(app.store().len(), 1);
    assert_eq!(app.store().snapshot()[0].status(), ProjectStatus::Active);
    assert_eq!(item_texts(&app, ProjectStatus::Active), vec!["3 persons assigned"]);
    assert!(item_texts(&app, ProjectStatus::Done).is_empty());
}

#[test]
fn rejected_submit_leaves_store_untouched() {
    let app = app();
    let notified = count_notifications(app.store());
    submit(&app, "Build API", "v1", "0");

    assert!(app.store().is_empty());
    assert_eq!(notified.get(), 0);
    assert_eq!(app.dom().notices().len(), 1);
    assert_eq!(app.dom().page_reloads(), 0);
}

#[test]
fn dropping_moves_project_between_lists() {
    let app = app();
    submit(&app, "Build API", "v1", "3");
    let id = app.store().snapshot()[0].id().to_string();
    let notified = count_notifications(app.store());

    let outcome = app.drag_project(&id, ProjectStatus::Done).unwrap();
    assert!(matches!(outcome, DropOutcome::Dropped { .. }));

    assert_eq!(notified.get(), 1);
    assert_eq!(app.list(ProjectStatus::Active).unwrap().item_count(), 0);
    assert_eq!(app.list(ProjectStatus::Done).unwrap().item_count(), 1);
    assert_eq!(app.store().get(&id).unwrap().status(), ProjectStatus::Done);

    let done = app.list(ProjectStatus::Done).unwrap();
    assert_eq!(done.indicator(), DropIndicator::Idle);
    assert!(!app.dom().has_class(done.list_element(), DROPPABLE_CLASS).unwrap());
}

#[test]
fn dropping_onto_own_list_is_a_no_op() {
    let app = app();
    submit(&app, "Build API", "v1", "3");
    let id = app.store().snapshot()[0].id().to_string();
    let notified = count_notifications(app.store());

    app.drag_project(&id, ProjectStatus::Active).unwrap();
    assert_eq!(notified.get(), 0);
    assert_eq!(app.list(ProjectStatus::Active).unwrap().indicator(), DropIndicator::Idle);
}

#[test]
fn hover_then_leave_restores_idle() {
    let app = app();
    submit(&app, "Build API", "v1", "3");
    let before = app.store().snapshot();
    let dom = app.dom();
    let source = dom.get_by_id(before[0].id()).unwrap();
    let done = app.list(ProjectStatus::Done).unwrap();

    let mut session = DragSession::start(dom, source).unwrap();
    assert!(session.enter(done.root()).unwrap());
    assert_eq!(done.indicator(), DropIndicator::Droppable);
    assert!(dom.has_class(done.list_element(), DROPPABLE_CLASS).unwrap());

    // Hovering again keeps the same state.
    assert!(session.hover().unwrap());
    assert_eq!(done.indicator(), DropIndicator::Droppable);

    session.leave().unwrap();
    assert_eq!(done.indicator(), DropIndicator::Idle);
    assert!(!dom.has_class(done.list_element(), DROPPABLE_CLASS).unwrap());

    assert_eq!(session.release().unwrap(), DropOutcome::Cancelled);
    assert_eq!(app.store().snapshot(), before);
}

#[test]
fn drag_without_project_payload_is_refused() {
    let app = app();
    let dom = app.dom();
    // A bare element carrying no payload.
    let stray = dom.get_by_id("title").unwrap();
    let done = app.list(ProjectStatus::Done).unwrap();

    let outcome = DragSession::drag_to(dom, stray, done.root()).unwrap();
    assert_eq!(outcome, DropOutcome::Cancelled);
    assert_eq!(done.indicator(), DropIndicator::Idle);
}

/// A transfer as a drop target sees it: readable only once dropped.
fn incoming(raw: &str, mode: projboard_ui::dom::TransferMode) -> projboard_ui::DataTransfer {
    let mut transfer = projboard_ui::DataTransfer::new();
    transfer.set_data("text/plain", raw);
    transfer.effect_allowed = projboard_ui::DragEffect::Move;
    transfer.set_mode(mode);
    transfer
}

/// Hover `raw` over `list` until it shows as droppable, then drop it.
fn hover_then_drop(app: &App, status: ProjectStatus, raw: &str) {
    use projboard_ui::dom::TransferMode;
    use projboard_ui::{Event, EventKind};

    let list = app.list(status).unwrap();
    app.dom()
        .dispatch(list.root(), Event::with_transfer(EventKind::DragEnter, incoming(raw, TransferMode::Protected)))
        .unwrap();
    assert_eq!(list.indicator(), DropIndicator::Droppable);
    assert!(app.dom().has_class(list.list_element(), DROPPABLE_CLASS).unwrap());

    app.dom()
        .dispatch(list.root(), Event::with_transfer(EventKind::Drop, incoming(raw, TransferMode::ReadOnly)))
        .unwrap();
}

#[test]
fn forged_payload_is_rejected_at_drop() {
    let app = app();
    submit(&app, "Build API", "v1", "3");
    let before = app.store().snapshot();

    hover_then_drop(&app, ProjectStatus::Done, "p-1");

    let done = app.list(ProjectStatus::Done).unwrap();
    assert_eq!(app.store().snapshot(), before);
    assert_eq!(done.indicator(), DropIndicator::Idle);
    assert!(!app.dom().has_class(done.list_element(), DROPPABLE_CLASS).unwrap());
    assert_eq!(done.item_count(), 0);
}

#[test]
fn dropping_unknown_project_changes_nothing() {
    let app = app();
    submit(&app, "Build API", "v1", "3");
    let before = app.store().snapshot();
    let notifications = count_notifications(app.store());

    hover_then_drop(&app, ProjectStatus::Done, r#"{"kind":"move-project","projectId":"p-404"}"#);

    let done = app.list(ProjectStatus::Done).unwrap();
    assert_eq!(app.store().snapshot(), before);
    assert_eq!(notifications.get(), 0);
    assert_eq!(done.indicator(), DropIndicator::Idle);
    assert!(!app.dom().has_class(done.list_element(), DROPPABLE_CLASS).unwrap());
}

#[test]
fn project_id_clashing_with_page_ids_still_drags() {
    struct ClashingIds;

    impl IdGenerator for ClashingIds {
        fn next_id(&self) -> String {
            "title".to_string()
        }
    }

    let store = ProjectStore::with_ids(ClashingIds);
    let app = App::bootstrap(Dom::builtin().unwrap(), store, &BoardConfig::default()).unwrap();
    submit(&app, "Build API", "v1", "3");

    let source = app.item_root("title").unwrap();
    assert_eq!(app.dom().tag(source).unwrap(), "li");

    let outcome = app.drag_project("title", ProjectStatus::Done).unwrap();
    assert!(matches!(outcome, DropOutcome::Dropped { .. }));
    assert_eq!(app.store().get("title").unwrap().status(), ProjectStatus::Done);
    assert_eq!(item_texts(&app, ProjectStatus::Done).len(), 1);
    assert!(item_texts(&app, ProjectStatus::Active).is_empty());
}

#[test]
fn lists_keep_insertion_order() {
    let app = app();
    for (title, people) in [("a", "1"), ("b", "2"), ("c", "3")] {
        submit(&app, title, "d", people);
    }
    let first = app.store().snapshot()[0].id().to_string();
    app.drag_project(&first, ProjectStatus::Done).unwrap();
    app.drag_project(&first, ProjectStatus::Active).unwrap();

    assert_eq!(
        item_texts(&app, ProjectStatus::Active),
        vec!["1 person assigned", "2 persons assigned", "3 persons assigned"]
    );
}

#[test]
fn rendering_twice_does_not_duplicate() {
    let app = app();
    submit(&app, "a", "b", "1");
    let active = app.list(ProjectStatus::Active).unwrap();
    active.render().unwrap();
    active.render().unwrap();
    assert_eq!(active.item_count(), 1);
    assert_eq!(app.dom().children(active.list_element()).unwrap().len(), 1);
}

#[test]
fn html_shows_rendered_items() {
    let app = app();
    submit(&app, "Build <API>", "v1", "3");
    let html = app.html().unwrap();
    assert!(html.contains("<h2>Build &lt;API&gt;</h2>"));
    assert!(html.contains("<h3>3 persons assigned</h3>"));
    assert!(html.contains("id=\"active-projects-list\""));
}

#[test]
fn missing_template_is_fatal_at_startup() {
    let dom = Dom::from_markup("[[body]]\ntag = \"div\"\nid = \"app\"").unwrap();
    let result = App::bootstrap(dom, ProjectStore::new(), &BoardConfig::default());
    assert!(result.is_err());
}
