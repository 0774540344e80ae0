//! `hostmask_core` holds the data model shared by the catalog and the view
//! layer: hosts files, file groups, and the helpers for remote sources.
//!
//! Files are owned by whoever runs the catalog; everything else refers to
//! them through generational [`FileId`] handles, so a handle to a removed
//! file is a checked condition rather than a dangling pointer.

pub mod file;
pub mod group;
pub mod remote;

pub use file::{
  FileId,
  FileOrigin,
  HostsFile,
};
pub use group::{
  GroupKind,
  HostsGroup,
  groups_contain,
};
pub use remote::{
  RemoteConfig,
  UpdateInterval,
  is_valid_source_url,
};
