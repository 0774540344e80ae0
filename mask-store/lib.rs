//! Reactive view-state core for a hosts-file manager.
//!
//! The document-management subsystem (file loading, remote downloading,
//! saving) runs on its own worker threads and publishes typed events; a
//! single coordinating task folds those into one observable [`ViewStore`]
//! the presentation layer binds to. The interesting guarantees live here:
//!
//! - bursts of row-refresh events coalesce into one token increment per
//!   quantum, so a ten-event download cascade costs one re-render;
//! - selection round-trips between UI and model without echo loops;
//! - overlapping background operations derive one stable busy flag;
//! - viewports only pay for a full text comparison when the same file's
//!   token advanced with an unchanged length ([`ContentSyncState`]).
//!
//! The subsystem is injected as an [`Arc<dyn HostsCatalog>`]; nothing in
//! this crate reaches for a global instance.
//!
//! [`Arc<dyn HostsCatalog>`]: HostsCatalog

pub mod catalog;
pub mod coordinator;
pub mod memory;
pub mod selection;
pub mod store;
pub mod viewport;

pub use catalog::{
  CatalogError,
  HostsCatalog,
};
pub use coordinator::Coordinator;
pub use memory::MemoryCatalog;
pub use selection::SelectionBridge;
pub use store::{
  ViewHandle,
  ViewStore,
};
pub use viewport::{
  ContentSyncState,
  SyncDecision,
};
