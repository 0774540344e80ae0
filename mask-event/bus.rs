use hostmask_core::FileId;
use tokio::sync::mpsc::{
  self,
  UnboundedReceiver,
  UnboundedSender,
};

/// Lifecycle notifications published by the catalog and its worker threads.
///
/// Payloads are [`FileId`] handles, not file data: by the time an event is
/// consumed the file may already have changed again (or be gone), and the
/// consumer re-reads whatever it needs from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsEvent {
  /// A file was added to the catalog.
  Created(FileId),
  /// A file was removed from the catalog.
  Removed(FileId),
  /// A file was renamed in place.
  Renamed(FileId),
  /// A file's contents were written out.
  Saved(FileId),
  /// A file's row-level attributes changed (enabled, error, existence).
  NodeUpdated(FileId),
  /// A remote group started or stopped synchronizing.
  SyncStatusChanged(FileId),
  /// The initial disk load finished.
  AllLoaded,
  /// The UI should start renaming this file.
  ShouldRename(FileId),
  /// The catalog wants this file selected.
  ShouldSelect(FileId),
  /// A background operation started.
  Busy,
  /// A background operation finished.
  NotBusy,
}

/// Create the event channel: one [`EventSink`] for producers, one
/// [`EventSource`] for the coordinating task.
pub fn channel() -> (EventSink, EventSource) {
  let (tx, rx) = mpsc::unbounded_channel();
  (EventSink { tx }, EventSource { rx })
}

/// Producer half. Cheap to clone, safe to use from any thread.
#[derive(Debug, Clone)]
pub struct EventSink {
  tx: UnboundedSender<HostsEvent>,
}

impl EventSink {
  /// Queue an event for the coordinator. Never blocks the caller.
  ///
  /// Events from one thread arrive in publication order; across threads the
  /// only guarantee is exactly-once delivery.
  pub fn publish(&self, event: HostsEvent) {
    if self.tx.send(event).is_err() {
      log::warn!("event {event:?} published after the coordinator shut down");
    }
  }
}

/// Consumer half, owned by the coordinating task.
#[derive(Debug)]
pub struct EventSource {
  rx: UnboundedReceiver<HostsEvent>,
}

impl EventSource {
  /// Wait for the next event. Returns `None` once every sink is dropped.
  pub async fn recv(&mut self) -> Option<HostsEvent> {
    self.rx.recv().await
  }

  /// Take an already-queued event without waiting.
  ///
  /// The coordinator uses this to drain the rest of the current quantum
  /// after `recv` delivered its first event.
  pub fn try_recv(&mut self) -> Option<HostsEvent> {
    self.rx.try_recv().ok()
  }
}

#[cfg(test)]
mod tests {
  use std::thread;

  use super::*;

  #[tokio::test(flavor = "current_thread")]
  async fn same_producer_order_is_preserved() {
    let (sink, mut source) = channel();

    let producer = thread::spawn(move || {
      for _ in 0..50 {
        sink.publish(HostsEvent::Busy);
        sink.publish(HostsEvent::AllLoaded);
        sink.publish(HostsEvent::NotBusy);
      }
    });
    producer.join().expect("producer thread");

    for _ in 0..50 {
      assert_eq!(source.recv().await, Some(HostsEvent::Busy));
      assert_eq!(source.recv().await, Some(HostsEvent::AllLoaded));
      assert_eq!(source.recv().await, Some(HostsEvent::NotBusy));
    }
    assert_eq!(source.try_recv(), None);
  }

  #[tokio::test(flavor = "current_thread")]
  async fn events_from_many_threads_are_delivered_exactly_once() {
    let (sink, mut source) = channel();

    let threads: Vec<_> = (0..4)
      .map(|_| {
        let sink = sink.clone();
        thread::spawn(move || {
          for _ in 0..100 {
            sink.publish(HostsEvent::Busy);
          }
        })
      })
      .collect();
    for thread in threads {
      thread.join().expect("producer thread");
    }
    drop(sink);

    let mut delivered = 0;
    while source.recv().await.is_some() {
      delivered += 1;
    }
    assert_eq!(delivered, 400);
  }

  #[tokio::test(flavor = "current_thread")]
  async fn publish_after_shutdown_is_ignored() {
    let (sink, source) = channel();
    drop(source);
    // Must not panic or block.
    sink.publish(HostsEvent::AllLoaded);
  }
}
