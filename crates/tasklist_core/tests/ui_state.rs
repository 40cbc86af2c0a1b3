use tasklist_core::{
    Dialog, FilterMode, MemoryStore, PersistenceBridge, TaskStore, UiState, ValidationError,
    GENERIC_WARNING,
};

fn setup() -> (TaskStore<MemoryStore>, UiState) {
    let store = TaskStore::open(PersistenceBridge::new(MemoryStore::new()));
    (store, UiState::new())
}

#[test]
fn new_state_shows_all_tasks_without_dialog() {
    let (mut store, ui) = setup();
    let id = store.add("one").unwrap();
    store.toggle(id);
    store.add("two").unwrap();

    assert_eq!(ui.filter(), FilterMode::All);
    assert_eq!(ui.dialog(), None);
    assert_eq!(ui.editing(), None);
    assert_eq!(ui.visible(&store).len(), 2);
}

#[test]
fn set_filter_changes_visible_tasks() {
    let (mut store, mut ui) = setup();
    let id = store.add("one").unwrap();
    store.add("two").unwrap();
    store.toggle(id);

    ui.set_filter(FilterMode::Pending);
    let visible = ui.visible(&store);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].text, "two");
}

#[test]
fn rejected_add_opens_warning() {
    let (mut store, mut ui) = setup();
    ui.submit_add(&mut store, "Buy milk").unwrap();

    let err = ui.submit_add(&mut store, "buy milk").unwrap_err();
    assert_eq!(err, ValidationError::Duplicate);
    assert_eq!(
        ui.warning_message(),
        Some(ValidationError::Duplicate.to_string().as_str())
    );
    assert_eq!(store.len(), 1);

    ui.close_warning();
    assert_eq!(ui.dialog(), None);
}

#[test]
fn empty_warning_uses_generic_message() {
    let (_, mut ui) = setup();
    ui.show_warning("");
    assert_eq!(ui.warning_message(), Some(GENERIC_WARNING));
}

#[test]
fn edit_flow_clears_marker_after_duplicate_and_success() {
    let (mut store, mut ui) = setup();
    store.add("Buy milk").unwrap();
    let id = store.add("Call mom").unwrap();

    ui.start_edit(id);
    assert_eq!(ui.editing(), Some(id));
    assert_eq!(ui.submit_edit(&mut store, "buy milk"), Err(ValidationError::Duplicate));
    assert_eq!(ui.editing(), None);
    assert_eq!(store.get(id).unwrap().text, "Call mom");
    assert!(ui.warning_message().is_some());

    ui.close_warning();
    ui.start_edit(id);
    assert_eq!(ui.submit_edit(&mut store, "Call dad"), Ok(true));
    assert_eq!(ui.editing(), None);
    assert_eq!(store.get(id).unwrap().text, "Call dad");
    assert_eq!(ui.dialog(), None);
}

#[test]
fn empty_edit_submit_stays_in_edit_mode() {
    let (mut store, mut ui) = setup();
    let id = store.add("Call mom").unwrap();

    ui.start_edit(id);
    assert_eq!(ui.submit_edit(&mut store, "   "), Err(ValidationError::Empty));
    assert_eq!(ui.editing(), Some(id));
    assert_eq!(store.get(id).unwrap().text, "Call mom");
    assert_eq!(
        ui.warning_message(),
        Some(ValidationError::Empty.to_string().as_str())
    );

    ui.close_warning();
    assert_eq!(ui.submit_edit(&mut store, "Call dad"), Ok(true));
    assert_eq!(ui.editing(), None);
}

#[test]
fn submit_edit_without_active_edit_is_noop() {
    let (mut store, mut ui) = setup();
    let id = store.add("one").unwrap();

    ui.start_edit(id);
    ui.cancel_edit();
    assert_eq!(ui.submit_edit(&mut store, "two"), Ok(false));
    assert_eq!(store.get(id).unwrap().text, "one");
}

#[test]
fn delete_requires_confirmation() {
    let (mut store, mut ui) = setup();
    let id = store.add("one").unwrap();

    ui.request_delete(id);
    assert_eq!(ui.dialog(), Some(&Dialog::ConfirmDelete(id)));
    assert_eq!(ui.pending_delete(), Some(id));
    ui.cancel_delete();
    assert_eq!(ui.dialog(), None);
    assert_eq!(store.len(), 1);

    ui.request_delete(id);
    assert!(ui.confirm_delete(&mut store));
    assert_eq!(ui.dialog(), None);
    assert!(store.is_empty());
}

#[test]
fn confirm_without_pending_delete_keeps_warning_open() {
    let (mut store, mut ui) = setup();
    store.add("one").unwrap();
    ui.show_warning("careful");

    assert!(!ui.confirm_delete(&mut store));
    assert_eq!(ui.warning_message(), Some("careful"));
    assert_eq!(store.len(), 1);
}

#[test]
fn confirming_delete_of_edited_task_clears_edit_marker() {
    let (mut store, mut ui) = setup();
    let id = store.add("one").unwrap();

    ui.start_edit(id);
    ui.request_delete(id);
    assert!(ui.confirm_delete(&mut store));
    assert_eq!(ui.editing(), None);
}
