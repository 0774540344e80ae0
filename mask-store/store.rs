use std::sync::Arc;

use hostmask_core::{
  FileId,
  HostsGroup,
  groups_contain,
};
use hostmask_event::{
  BusyTracker,
  HostsEvent,
  RefreshCoalescer,
};
use ropey::Rope;
use tokio::sync::watch;

use crate::{
  catalog::HostsCatalog,
  selection::SelectionBridge,
  viewport::{
    ContentSyncState,
    SyncDecision,
  },
};

/// The aggregate view state for the hosts-file window.
///
/// Owns every observable field the presentation layer binds to, plus the
/// busy tracker, the refresh coalescer, and the selection bridge. All
/// mutation happens on the coordinating task: events arrive through
/// [`handle_event`](ViewStore::handle_event) and UI-originated operations
/// are plain method calls made from the same task.
pub struct ViewStore {
  catalog: Arc<dyn HostsCatalog>,
  bridge:  SelectionBridge,
  tracker: BusyTracker,
  refresh: RefreshCoalescer,

  groups:           watch::Sender<Arc<[HostsGroup]>>,
  selection:        watch::Sender<Option<FileId>>,
  files_count:      watch::Sender<usize>,
  can_remove_files: watch::Sender<bool>,
  renaming_target:  watch::Sender<Option<FileId>>,
  busy:             watch::Sender<bool>,
  refresh_token:    watch::Sender<u64>,
}

/// Read side of the view state, handed to the presentation layer.
///
/// Each field is independently observable; cloning the handle (or a single
/// receiver) is cheap.
#[derive(Debug, Clone)]
pub struct ViewHandle {
  pub groups:           watch::Receiver<Arc<[HostsGroup]>>,
  pub selection:        watch::Receiver<Option<FileId>>,
  pub files_count:      watch::Receiver<usize>,
  pub can_remove_files: watch::Receiver<bool>,
  pub renaming_target:  watch::Receiver<Option<FileId>>,
  pub busy:             watch::Receiver<bool>,
  pub refresh_token:    watch::Receiver<u64>,
}

impl ViewStore {
  /// Build the store around an injected catalog and pull the initial
  /// snapshot and counts.
  pub fn new(catalog: Arc<dyn HostsCatalog>) -> (Self, ViewHandle) {
    let empty: Arc<[HostsGroup]> = Vec::new().into();
    let (groups, groups_rx) = watch::channel(empty);
    let (selection, selection_rx) = watch::channel(None);
    let (files_count, files_count_rx) = watch::channel(0);
    let (can_remove_files, can_remove_files_rx) = watch::channel(false);
    let (renaming_target, renaming_target_rx) = watch::channel(None);
    let (busy, busy_rx) = watch::channel(false);
    let (refresh_token, refresh_token_rx) = watch::channel(0);

    let mut store = Self {
      catalog,
      bridge: SelectionBridge::new(),
      tracker: BusyTracker::new(),
      refresh: RefreshCoalescer::new(),
      groups,
      selection,
      files_count,
      can_remove_files,
      renaming_target,
      busy,
      refresh_token,
    };
    store.refresh_groups();
    store.refresh_counts();

    let handle = ViewHandle {
      groups:           groups_rx,
      selection:        selection_rx,
      files_count:      files_count_rx,
      can_remove_files: can_remove_files_rx,
      renaming_target:  renaming_target_rx,
      busy:             busy_rx,
      refresh_token:    refresh_token_rx,
    };
    (store, handle)
  }

  /// Route one catalog event. Called from the coordinator, once per event,
  /// in delivery order.
  pub fn handle_event(&mut self, event: HostsEvent) {
    match event {
      HostsEvent::Created(_) | HostsEvent::Removed(_) | HostsEvent::Renamed(_) => {
        self.refresh_groups();
        self.refresh_counts();
      },
      HostsEvent::AllLoaded => {
        self.refresh_groups();
        self.refresh_counts();
        // The load decided which file is active; reflect it without
        // echoing a select back. No active file clears the selection.
        let active = self.catalog.active_file();
        self.apply_model_selection(active);
      },
      HostsEvent::Saved(_) | HostsEvent::NodeUpdated(_) | HostsEvent::SyncStatusChanged(_) => {
        self.refresh.request_refresh();
      },
      HostsEvent::ShouldRename(file) => {
        store_value(&self.renaming_target, Some(file));
      },
      HostsEvent::ShouldSelect(file) => {
        self.apply_model_selection(Some(file));
      },
      HostsEvent::Busy => {
        if let Some(flag) = self.tracker.on_busy() {
          store_value(&self.busy, flag);
        }
      },
      HostsEvent::NotBusy => {
        if let Some(flag) = self.tracker.on_idle() {
          store_value(&self.busy, flag);
        }
      },
    }
  }

  /// Replace the groups snapshot from the catalog.
  ///
  /// An unavailable catalog yields an empty view, not an error. A selection
  /// that is no longer reachable from the new snapshot is cleared before
  /// the snapshot lands, so observers never see a stale selection paired
  /// with fresh groups.
  pub fn refresh_groups(&mut self) {
    let snapshot = match self.catalog.snapshot() {
      Ok(groups) => groups,
      Err(err) => {
        log::warn!("hosts catalog snapshot failed ({err}); showing an empty view");
        Vec::new().into()
      },
    };

    if let Some(selected) = self.selection()
      && !groups_contain(&snapshot, selected)
    {
      log::debug!("selected file is gone from the catalog; clearing selection");
      self.apply_model_selection(None);
    }
    self.groups.send_replace(snapshot);
  }

  /// Re-query the scalar counts.
  pub fn refresh_counts(&mut self) {
    store_value(&self.files_count, self.catalog.files_count());
    store_value(&self.can_remove_files, self.catalog.can_remove_files());
  }

  /// Flush the refresh coalescer. The coordinator calls this once at the
  /// end of every quantum; embedders running their own loop must do the
  /// same.
  pub fn flush_refresh(&mut self) {
    if let Some(token) = self.refresh.flush() {
      self.refresh_token.send_replace(token);
    }
  }

  /// UI-originated selection write (row click, keyboard navigation).
  ///
  /// Forwards the new selection to the catalog exactly once; writes that
  /// merely restate the current selection, and writes made while a
  /// model-originated update is being applied, are dropped.
  pub fn select_from_ui(&mut self, file: Option<FileId>) {
    if self.bridge.is_applying_from_model() {
      log::debug!("selection write re-entered during a model apply; dropping");
      return;
    }
    if !store_value(&self.selection, file) {
      return;
    }
    if let Some(file) = file {
      self.catalog.select(file);
    }
  }

  /// Editor-originated body write for the currently selected file.
  pub fn set_selected_contents(&mut self, contents: Rope) {
    if let Some(file) = self.selection() {
      self.catalog.set_contents(file, contents);
    }
  }

  /// Reconcile one viewport against the current selection and refresh
  /// token. Returns the contents to install when the buffer must be
  /// replaced, `None` when it is already in sync.
  pub fn sync_viewport(&self, viewport: &mut ContentSyncState, buffer: &Rope) -> Option<Rope> {
    let selection = self.selection();
    let contents = selection
      .and_then(|file| self.catalog.contents(file))
      .unwrap_or_default();
    match viewport.reconcile(selection, self.refresh.token(), &contents, buffer) {
      SyncDecision::Replace => Some(contents),
      SyncDecision::Keep => None,
    }
  }

  /// The rename target was handled (or dismissed) by the UI.
  pub fn clear_renaming_target(&mut self) {
    store_value(&self.renaming_target, None);
  }

  pub fn selection(&self) -> Option<FileId> {
    *self.selection.borrow()
  }

  pub fn renaming_target(&self) -> Option<FileId> {
    *self.renaming_target.borrow()
  }

  pub fn is_busy(&self) -> bool {
    self.tracker.is_busy()
  }

  pub fn refresh_token(&self) -> u64 {
    self.refresh.token()
  }

  /// Model-originated selection write; never forwarded back to the
  /// catalog's `select`.
  ///
  /// A file that is not reachable from the current snapshot (removed in the
  /// same quantum, say) clears the selection instead of installing a stale
  /// handle.
  fn apply_model_selection(&mut self, file: Option<FileId>) {
    let file = file.filter(|file| {
      let reachable = groups_contain(&self.groups.borrow(), *file);
      if !reachable {
        log::debug!("model selected a file missing from the snapshot; clearing selection");
      }
      reachable
    });
    let selection = &self.selection;
    self.bridge.apply_from_model(|| {
      store_value(selection, file);
    });
  }
}

/// Write through a watch sender only when the value actually changed, so
/// observers are not woken for restatements.
fn store_value<T: PartialEq>(tx: &watch::Sender<T>, value: T) -> bool {
  tx.send_if_modified(|current| {
    if *current == value {
      return false;
    }
    *current = value;
    true
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::memory::MemoryCatalog;
  use hostmask_core::{
    GroupKind,
    HostsFile,
  };
  use hostmask_event::channel;

  #[test]
  fn construction_pulls_the_initial_snapshot() {
    let (sink, _source) = channel();
    let catalog = MemoryCatalog::new(sink);
    let local = catalog.add_group("Local", GroupKind::Local);
    catalog.create_file(local, HostsFile::new("Development"));

    let (store, handle) = ViewStore::new(Arc::new(catalog));
    assert_eq!(handle.groups.borrow().len(), 1);
    assert_eq!(*handle.files_count.borrow(), 1);
    assert_eq!(store.selection(), None);
  }

  #[test]
  fn unavailable_catalog_yields_an_empty_view() {
    let (sink, _source) = channel();
    let catalog = MemoryCatalog::new(sink);
    let local = catalog.add_group("Local", GroupKind::Local);
    catalog.create_file(local, HostsFile::new("Development"));
    catalog.set_available(false);

    let (_store, handle) = ViewStore::new(Arc::new(catalog));
    assert!(handle.groups.borrow().is_empty());
  }

  #[test]
  fn restating_the_selection_does_not_reselect() {
    let (sink, _source) = channel();
    let catalog = MemoryCatalog::new(sink);
    let local = catalog.add_group("Local", GroupKind::Local);
    let file = catalog.create_file(local, HostsFile::new("Development"));

    let catalog = Arc::new(catalog);
    let (mut store, _handle) = ViewStore::new(catalog.clone());
    store.select_from_ui(Some(file));
    store.select_from_ui(Some(file));
    assert_eq!(catalog.select_calls(), 1);
  }
}
