use hostmask_event::{
  EventSource,
  HostsEvent,
};

use crate::store::ViewStore;

/// The single coordinating task.
///
/// Owns the store and the event channel's receive side. One quantum is one
/// drain pass: the first event is taken, everything already queued behind
/// it is routed in order, and only then is the refresh coalescer flushed.
/// The flush is therefore a deferred step on the coordinator's own queue;
/// no wall-clock timer is involved, and at most one flush happens per
/// quantum no matter how many raw events arrived.
///
/// Events published *during* a quantum (a catalog `select` acknowledging,
/// a handler kicking off a save) were not yet queued when the drain
/// started, so they land in the next quantum. That is what keeps refresh
/// requests and selection writes from re-entering a flush or apply step
/// synchronously.
pub struct Coordinator {
  store:  ViewStore,
  events: EventSource,
}

impl Coordinator {
  pub fn new(store: ViewStore, events: EventSource) -> Self {
    Self { store, events }
  }

  pub fn store(&self) -> &ViewStore {
    &self.store
  }

  /// UI-originated operations (selection, rename dismissal, editor writes)
  /// go through here, so they run on the coordinating task by construction.
  pub fn store_mut(&mut self) -> &mut ViewStore {
    &mut self.store
  }

  /// Process one quantum if any event is already queued. Returns `false`
  /// when the queue was empty.
  pub fn turn(&mut self) -> bool {
    let Some(first) = self.events.try_recv() else {
      return false;
    };
    self.quantum(first);
    true
  }

  /// Run until every event sink has been dropped.
  pub async fn run(mut self) {
    while let Some(event) = self.events.recv().await {
      self.quantum(event);
    }
    log::debug!("event channel closed; coordinator exiting");
  }

  fn quantum(&mut self, first: HostsEvent) {
    self.store.handle_event(first);
    while let Some(event) = self.events.try_recv() {
      self.store.handle_event(event);
    }
    self.store.flush_refresh();
  }
}
