use ropey::Rope;
use slotmap::new_key_type;

use crate::remote::UpdateInterval;

new_key_type! {
  /// Generational handle to a hosts file.
  ///
  /// The catalog owns the files in a slotmap; a removed file invalidates its
  /// key, and a reused slot yields a fresh generation. Comparing two ids is
  /// therefore an identity check, never a name or content comparison.
  pub struct FileId;
}

/// Where a hosts file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOrigin {
  /// Created and edited locally.
  Local,
  /// Mirrored from a remote source and refreshed on an interval.
  Remote {
    url:      String,
    interval: UpdateInterval,
  },
}

/// A single hosts-style text resource.
#[derive(Debug, Clone)]
pub struct HostsFile {
  pub name:     String,
  pub contents: Rope,
  pub origin:   FileOrigin,
  /// Contents match what is on disk.
  pub saved:    bool,
  /// This file is the one currently installed as the system hosts file.
  pub active:   bool,
  pub enabled:  bool,
  /// The backing file still exists on disk.
  pub exists:   bool,
  pub editable: bool,
  /// Last load or download failure, if any.
  pub error:    Option<String>,
}

impl HostsFile {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:     name.into(),
      contents: Rope::new(),
      origin:   FileOrigin::Local,
      saved:    true,
      active:   false,
      enabled:  false,
      exists:   true,
      editable: true,
      error:    None,
    }
  }

  pub fn remote(name: impl Into<String>, url: impl Into<String>) -> Self {
    Self {
      origin: FileOrigin::Remote {
        url:      url.into(),
        interval: UpdateInterval::default(),
      },
      // Remote mirrors are read-only until downloaded.
      editable: false,
      exists: false,
      ..Self::new(name)
    }
  }

  pub fn with_contents(mut self, text: &str) -> Self {
    self.contents = Rope::from_str(text);
    self
  }

  pub fn is_remote(&self) -> bool {
    matches!(self.origin, FileOrigin::Remote { .. })
  }

  /// Replace the body text, marking the file dirty.
  pub fn set_contents(&mut self, contents: Rope) {
    self.contents = contents;
    self.saved = false;
  }
}
