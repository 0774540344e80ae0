//! End-to-end sessions: a `MemoryCatalog` publishing through the real bus
//! into a `Coordinator`, observed through the `ViewHandle`.

use std::sync::Arc;

use hostmask_core::{
  FileId,
  GroupKind,
  HostsFile,
};
use hostmask_event::{
  EventSink,
  HostsEvent,
  channel,
};
use hostmask_store::{
  ContentSyncState,
  Coordinator,
  MemoryCatalog,
  ViewHandle,
  ViewStore,
};
use ropey::Rope;

struct Session {
  catalog:     Arc<MemoryCatalog>,
  sink:        EventSink,
  coordinator: Coordinator,
  handle:      ViewHandle,
}

fn session() -> Session {
  let (sink, source) = channel();
  let catalog = Arc::new(MemoryCatalog::new(sink.clone()));
  let (store, handle) = ViewStore::new(catalog.clone());
  Session {
    catalog,
    sink,
    coordinator: Coordinator::new(store, source),
    handle,
  }
}

fn local_file(session: &mut Session, name: &str) -> FileId {
  let group = session.catalog.add_group("Local", GroupKind::Local);
  let file = session.catalog.create_file(group, HostsFile::new(name));
  assert!(session.coordinator.turn());
  file
}

#[test]
fn overlapping_busy_signals_produce_one_transition_pair() {
  let mut session = session();
  let mut busy = session.handle.busy.clone();
  busy.borrow_and_update();

  let mut observed = Vec::new();
  let signals = [
    HostsEvent::Busy,
    HostsEvent::Busy,
    HostsEvent::NotBusy,
    HostsEvent::NotBusy,
  ];
  for signal in signals {
    session.sink.publish(signal);
    assert!(session.coordinator.turn());
    if busy.has_changed().expect("store alive") {
      observed.push(*busy.borrow_and_update());
    }
  }

  assert_eq!(observed, vec![true, false]);
}

#[test]
fn row_refresh_burst_in_one_quantum_increments_the_token_once() {
  let mut session = session();
  let file = local_file(&mut session, "Development");
  let before = *session.handle.refresh_token.borrow();

  session.sink.publish(HostsEvent::Saved(file));
  session.sink.publish(HostsEvent::NodeUpdated(file));
  session.sink.publish(HostsEvent::NodeUpdated(file));
  session.sink.publish(HostsEvent::SyncStatusChanged(file));
  assert!(session.coordinator.turn());

  assert_eq!(*session.handle.refresh_token.borrow(), before + 1);
  assert!(!session.coordinator.turn(), "nothing left queued");
}

#[test]
fn bursts_across_quanta_increment_the_token_per_quantum() {
  let mut session = session();
  let file = local_file(&mut session, "Development");
  let before = *session.handle.refresh_token.borrow();

  for _ in 0..3 {
    session.sink.publish(HostsEvent::NodeUpdated(file));
    session.sink.publish(HostsEvent::Saved(file));
    assert!(session.coordinator.turn());
  }

  assert_eq!(*session.handle.refresh_token.borrow(), before + 3);
}

#[test]
fn ui_selection_round_trip_selects_exactly_once() {
  let mut session = session();
  let file = local_file(&mut session, "Development");

  session.coordinator.store_mut().select_from_ui(Some(file));
  assert_eq!(session.catalog.select_calls(), 1);
  assert_eq!(*session.handle.selection.borrow(), Some(file));

  // The catalog acknowledged with a should-select; consuming it must not
  // go back into `select`.
  assert!(session.coordinator.turn());
  assert_eq!(session.catalog.select_calls(), 1);
  assert_eq!(*session.handle.selection.borrow(), Some(file));
  assert!(!session.coordinator.turn());
}

#[test]
fn model_should_select_never_calls_back_into_select() {
  let mut session = session();
  let file = local_file(&mut session, "Development");

  session.sink.publish(HostsEvent::ShouldSelect(file));
  assert!(session.coordinator.turn());

  assert_eq!(*session.handle.selection.borrow(), Some(file));
  assert_eq!(session.catalog.select_calls(), 0);
}

#[test]
fn created_and_removed_files_reshape_the_snapshot() {
  let mut session = session();
  assert!(session.handle.groups.borrow().is_empty());

  let file = local_file(&mut session, "Development");
  {
    let groups = session.handle.groups.borrow();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].contains(file));
  }
  assert_eq!(*session.handle.files_count.borrow(), 1);

  session.catalog.remove_file(file);
  assert!(session.coordinator.turn());
  assert!(session.handle.groups.borrow()[0].files.is_empty());
  assert_eq!(*session.handle.files_count.borrow(), 0);
}

#[test]
fn removing_the_selected_file_clears_the_selection() {
  let mut session = session();
  let file = local_file(&mut session, "Development");
  session.coordinator.store_mut().select_from_ui(Some(file));
  assert!(session.coordinator.turn());

  session.catalog.remove_file(file);
  assert!(session.coordinator.turn());

  assert_eq!(*session.handle.selection.borrow(), None);
  assert_eq!(session.catalog.select_calls(), 1, "clearing is not a select");
}

#[test]
fn unavailable_catalog_empties_the_view_until_it_returns() {
  let mut session = session();
  let file = local_file(&mut session, "Development");

  session.catalog.set_available(false);
  session.sink.publish(HostsEvent::Renamed(file));
  assert!(session.coordinator.turn());
  assert!(session.handle.groups.borrow().is_empty());

  session.catalog.set_available(true);
  session.sink.publish(HostsEvent::Renamed(file));
  assert!(session.coordinator.turn());
  assert_eq!(session.handle.groups.borrow().len(), 1);
}

#[test]
fn initial_load_applies_the_active_file_without_selecting() {
  let mut session = session();
  let group = session.catalog.add_group("Local", GroupKind::Local);
  let file = session
    .catalog
    .create_file(group, HostsFile::new("Development"));
  session.catalog.finish_initial_load(Some(file));
  assert!(session.coordinator.turn());

  assert_eq!(*session.handle.selection.borrow(), Some(file));
  assert_eq!(session.catalog.select_calls(), 0);
}

#[test]
fn rename_requests_set_and_clear_the_target() {
  let mut session = session();
  let file = local_file(&mut session, "Development");

  session.catalog.request_rename(file);
  assert!(session.coordinator.turn());
  assert_eq!(*session.handle.renaming_target.borrow(), Some(file));

  session.coordinator.store_mut().clear_renaming_target();
  assert_eq!(*session.handle.renaming_target.borrow(), None);
}

#[test]
fn viewport_replaces_only_when_the_text_actually_changed() {
  let mut session = session();
  let group = session.catalog.add_group("Remote", GroupKind::Remote);
  let file = session.catalog.create_file(
    group,
    HostsFile::remote("Ad Block", "https://example.com/hosts"),
  );
  assert!(session.coordinator.turn());
  session.coordinator.store_mut().select_from_ui(Some(file));
  assert!(session.coordinator.turn());

  let mut viewport = ContentSyncState::new();
  let mut buffer = Rope::new();

  // Binding the selection replaces once, even though the file is empty.
  let bound = session
    .coordinator
    .store()
    .sync_viewport(&mut viewport, &buffer);
  assert!(bound.is_some());
  buffer = bound.expect("initial bind");

  session
    .catalog
    .download_finished(file, "0.0.0.0 ads.example.com\n");
  assert!(session.coordinator.turn());

  // Token advanced with new text: one replacement.
  let replaced = session
    .coordinator
    .store()
    .sync_viewport(&mut viewport, &buffer);
  buffer = replaced.expect("downloaded text installs");
  assert_eq!(buffer.to_string(), "0.0.0.0 ads.example.com\n");

  // Incidental pass at the same token: nothing to do.
  assert!(
    session
      .coordinator
      .store()
      .sync_viewport(&mut viewport, &buffer)
      .is_none()
  );

  // A save advances the token but the text is unchanged: compared, kept.
  session.catalog.save_file(file);
  assert!(session.coordinator.turn());
  assert!(
    session
      .coordinator
      .store()
      .sync_viewport(&mut viewport, &buffer)
      .is_none()
  );
}
