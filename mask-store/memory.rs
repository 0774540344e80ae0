use std::sync::{
  Arc,
  atomic::{
    AtomicBool,
    AtomicUsize,
    Ordering,
  },
};

use hostmask_core::{
  FileId,
  GroupKind,
  HostsFile,
  HostsGroup,
};
use hostmask_event::{
  EventSink,
  HostsEvent,
};
use parking_lot::Mutex;
use ropey::Rope;
use slotmap::SlotMap;

use crate::catalog::{
  CatalogError,
  HostsCatalog,
};

/// In-memory catalog backing the tests and the runnable example.
///
/// Owns files and groups the way the real subsystem's controllers do, and
/// publishes the same event cascades its worker threads would, so the store
/// cannot tell the difference. Cloning shares the underlying state.
#[derive(Clone)]
pub struct MemoryCatalog {
  inner: Arc<Inner>,
}

struct Inner {
  state:        Mutex<State>,
  events:       EventSink,
  available:    AtomicBool,
  select_calls: AtomicUsize,
}

#[derive(Default)]
struct State {
  files:    SlotMap<FileId, HostsFile>,
  groups:   Vec<HostsGroup>,
  active:   Option<FileId>,
  selected: Option<FileId>,
}

impl MemoryCatalog {
  pub fn new(events: EventSink) -> Self {
    Self {
      inner: Arc::new(Inner {
        state: Mutex::new(State::default()),
        events,
        available: AtomicBool::new(true),
        select_calls: AtomicUsize::new(0),
      }),
    }
  }

  /// A sink clone for worker threads that publish busy/not-busy around
  /// their own operations.
  pub fn events(&self) -> EventSink {
    self.inner.events.clone()
  }

  /// Simulate the subsystem being mid-startup or mid-teardown.
  pub fn set_available(&self, available: bool) {
    self.inner.available.store(available, Ordering::Relaxed);
  }

  /// How many times `select` was invoked.
  pub fn select_calls(&self) -> usize {
    self.inner.select_calls.load(Ordering::Relaxed)
  }

  /// Add a group; returns its index for `create_file`.
  pub fn add_group(&self, name: impl Into<String>, kind: GroupKind) -> usize {
    let mut state = self.inner.state.lock();
    state.groups.push(HostsGroup::new(name, kind));
    state.groups.len() - 1
  }

  pub fn create_file(&self, group: usize, file: HostsFile) -> FileId {
    let id = {
      let mut state = self.inner.state.lock();
      let id = state.files.insert(file);
      state.groups[group].files.push(id);
      id
    };
    self.inner.events.publish(HostsEvent::Created(id));
    id
  }

  pub fn remove_file(&self, id: FileId) {
    {
      let mut state = self.inner.state.lock();
      state.files.remove(id);
      for group in &mut state.groups {
        group.files.retain(|file| *file != id);
      }
      if state.active == Some(id) {
        state.active = None;
      }
      if state.selected == Some(id) {
        state.selected = None;
      }
    }
    self.inner.events.publish(HostsEvent::Removed(id));
  }

  pub fn rename_file(&self, id: FileId, name: impl Into<String>) {
    {
      let mut state = self.inner.state.lock();
      if let Some(file) = state.files.get_mut(id) {
        file.name = name.into();
      }
    }
    self.inner.events.publish(HostsEvent::Renamed(id));
  }

  pub fn save_file(&self, id: FileId) {
    {
      let mut state = self.inner.state.lock();
      if let Some(file) = state.files.get_mut(id) {
        file.saved = true;
      }
    }
    self.inner.events.publish(HostsEvent::Saved(id));
  }

  /// Mutate one file's row-level attributes and announce the change.
  pub fn update_node(&self, id: FileId, update: impl FnOnce(&mut HostsFile)) {
    {
      let mut state = self.inner.state.lock();
      if let Some(file) = state.files.get_mut(id) {
        update(file);
      }
    }
    self.inner.events.publish(HostsEvent::NodeUpdated(id));
  }

  pub fn begin_sync(&self, id: FileId) {
    self.set_synchronizing(id, true);
  }

  pub fn finish_sync(&self, id: FileId) {
    self.set_synchronizing(id, false);
  }

  /// The cascade a finished download publishes: sync-status, node update,
  /// and save, in that order.
  pub fn download_finished(&self, id: FileId, text: &str) {
    {
      let mut state = self.inner.state.lock();
      for group in &mut state.groups {
        if group.contains(id) {
          group.synchronizing = false;
        }
      }
      if let Some(file) = state.files.get_mut(id) {
        file.contents = Rope::from_str(text);
        file.saved = true;
        file.exists = true;
        file.enabled = true;
        file.error = None;
      }
    }
    self.inner.events.publish(HostsEvent::SyncStatusChanged(id));
    self.inner.events.publish(HostsEvent::NodeUpdated(id));
    self.inner.events.publish(HostsEvent::Saved(id));
  }

  /// Finish the initial disk load: record the active file and announce.
  pub fn finish_initial_load(&self, active: Option<FileId>) {
    {
      let mut state = self.inner.state.lock();
      state.active = active;
      if let Some(active) = active
        && let Some(file) = state.files.get_mut(active)
      {
        file.active = true;
      }
    }
    self.inner.events.publish(HostsEvent::AllLoaded);
  }

  /// Ask the UI to put this file's row into rename mode.
  pub fn request_rename(&self, id: FileId) {
    self.inner.events.publish(HostsEvent::ShouldRename(id));
  }

  fn set_synchronizing(&self, id: FileId, synchronizing: bool) {
    {
      let mut state = self.inner.state.lock();
      for group in &mut state.groups {
        if group.contains(id) {
          group.synchronizing = synchronizing;
        }
      }
    }
    self.inner.events.publish(HostsEvent::SyncStatusChanged(id));
  }
}

impl HostsCatalog for MemoryCatalog {
  fn snapshot(&self) -> Result<Arc<[HostsGroup]>, CatalogError> {
    if !self.inner.available.load(Ordering::Relaxed) {
      return Err(CatalogError::Unavailable);
    }
    Ok(self.inner.state.lock().groups.clone().into())
  }

  fn files_count(&self) -> usize {
    self.inner.state.lock().files.len()
  }

  fn can_remove_files(&self) -> bool {
    let state = self.inner.state.lock();
    state
      .selected
      .and_then(|id| state.files.get(id))
      .is_some_and(|file| file.editable)
  }

  fn active_file(&self) -> Option<FileId> {
    self.inner.state.lock().active
  }

  fn select(&self, file: FileId) {
    self.inner.select_calls.fetch_add(1, Ordering::Relaxed);
    self.inner.state.lock().selected = Some(file);
    // Acknowledge the way the real controller does: the outline selection
    // change comes back as a should-select notification.
    self.inner.events.publish(HostsEvent::ShouldSelect(file));
  }

  fn contents(&self, file: FileId) -> Option<Rope> {
    self.inner.state.lock().files.get(file).map(|file| file.contents.clone())
  }

  fn set_contents(&self, file: FileId, contents: Rope) {
    // Per-keystroke writes stay off the bus; the save path announces.
    let mut state = self.inner.state.lock();
    if let Some(file) = state.files.get_mut(file) {
      file.set_contents(contents);
    }
  }
}
