use std::sync::Arc;

use hostmask_core::{
  FileId,
  HostsGroup,
};
use ropey::Rope;
use thiserror::Error;

/// Failures surfaced by the document-management subsystem.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
  /// The subsystem is mid-startup or mid-teardown. Callers recover with an
  /// empty snapshot; this is never a hard failure.
  #[error("hosts catalog is unavailable")]
  Unavailable,
}

/// The document-management subsystem as the view layer consumes it.
///
/// The store receives this as an injected `Arc<dyn HostsCatalog>` at
/// construction; there is no process-wide instance to look up. All calls
/// are made from the coordinating task, but implementations are driven by
/// their own worker threads and must be `Send + Sync`.
pub trait HostsCatalog: Send + Sync {
  /// An ordered snapshot of every group. The returned value is immutable;
  /// later catalog changes are observed through a fresh snapshot.
  fn snapshot(&self) -> Result<Arc<[HostsGroup]>, CatalogError>;

  fn files_count(&self) -> usize;

  fn can_remove_files(&self) -> bool;

  /// The file currently installed as the system hosts file, if any.
  fn active_file(&self) -> Option<FileId>;

  /// Model-side selection request. May itself publish further events
  /// (including a should-select acknowledgment).
  fn select(&self, file: FileId);

  /// The body text of `file`, or `None` if the handle is stale.
  fn contents(&self, file: FileId) -> Option<Rope>;

  /// Editor-originated body write.
  fn set_contents(&self, file: FileId, contents: Rope);
}
