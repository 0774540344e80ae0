//! Drives a full session against the in-memory catalog: a downloader
//! thread publishes the usual busy/sync/save cascade, the coordinator
//! folds it into view state, and a viewport reconciles its buffer.
//!
//! Run with `RUST_LOG=debug cargo run -p hostmask-store --example
//! download_lifecycle` to watch the store's decisions.

use std::{
  sync::Arc,
  thread,
  time::Duration,
};

use anyhow::Result;
use hostmask_core::{
  GroupKind,
  HostsFile,
};
use hostmask_event::{
  HostsEvent,
  channel,
};
use hostmask_store::{
  ContentSyncState,
  Coordinator,
  MemoryCatalog,
  ViewStore,
};
use ropey::Rope;

fn main() -> Result<()> {
  env_logger::init();

  let (sink, source) = channel();
  let catalog = MemoryCatalog::new(sink.clone());
  let remote = catalog.add_group("Remote", GroupKind::Remote);
  let file = catalog.create_file(
    remote,
    HostsFile::remote("Ad Block", "https://example.com/hosts"),
  );
  catalog.finish_initial_load(Some(file));

  let (store, handle) = ViewStore::new(Arc::new(catalog.clone()));
  let mut coordinator = Coordinator::new(store, source);

  // A downloader thread publishing the same cascade the real one would.
  let worker = {
    let catalog = catalog.clone();
    let sink = sink.clone();
    thread::spawn(move || {
      sink.publish(HostsEvent::Busy);
      catalog.begin_sync(file);
      thread::sleep(Duration::from_millis(50));
      catalog.download_finished(
        file,
        "0.0.0.0 ads.example.com\n0.0.0.0 tracker.example.com\n",
      );
      sink.publish(HostsEvent::NotBusy);
    })
  };
  worker.join().expect("download worker");

  // Everything the worker published is queued by now, so it all lands in
  // a single quantum: one token increment for the whole cascade.
  let mut viewport = ContentSyncState::new();
  let mut buffer = Rope::new();
  let mut quanta = 0;
  while coordinator.turn() {
    quanta += 1;
    if let Some(contents) = coordinator.store().sync_viewport(&mut viewport, &buffer) {
      buffer = contents;
    }
  }

  println!("quanta processed: {quanta}");
  println!("files:            {}", *handle.files_count.borrow());
  println!("busy:             {}", *handle.busy.borrow());
  println!("refresh token:    {}", *handle.refresh_token.borrow());
  println!("selected:         {:?}", *handle.selection.borrow());
  println!("viewport text:\n{buffer}");
  Ok(())
}
