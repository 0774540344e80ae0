use crate::file::FileId;

/// Which catalog section a group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
  Local,
  Remote,
  Combined,
}

/// A named, ordered collection of hosts files.
///
/// The catalog owns the live groups; the view layer only ever holds a
/// wholesale-replaced snapshot of them, so this is a plain value type.
#[derive(Debug, Clone)]
pub struct HostsGroup {
  pub name:          String,
  pub kind:          GroupKind,
  /// Remote groups go offline when the network does.
  pub online:        bool,
  pub synchronizing: bool,
  pub files:         Vec<FileId>,
}

impl HostsGroup {
  pub fn new(name: impl Into<String>, kind: GroupKind) -> Self {
    Self {
      name: name.into(),
      kind,
      online: true,
      synchronizing: false,
      files: Vec::new(),
    }
  }

  pub fn contains(&self, id: FileId) -> bool {
    self.files.contains(&id)
  }
}

/// Whether `id` is reachable from any group in the snapshot.
pub fn groups_contain(groups: &[HostsGroup], id: FileId) -> bool {
  groups.iter().any(|group| group.contains(id))
}

#[cfg(test)]
mod tests {
  use slotmap::SlotMap;

  use super::*;
  use crate::file::HostsFile;

  #[test]
  fn reachability_checks_every_group() {
    let mut files: SlotMap<FileId, HostsFile> = SlotMap::with_key();
    let a = files.insert(HostsFile::new("a"));
    let b = files.insert(HostsFile::new("b"));
    let orphan = files.insert(HostsFile::new("orphan"));

    let mut local = HostsGroup::new("Local", GroupKind::Local);
    local.files.push(a);
    let mut remote = HostsGroup::new("Remote", GroupKind::Remote);
    remote.files.push(b);

    let groups = [local, remote];
    assert!(groups_contain(&groups, a));
    assert!(groups_contain(&groups, b));
    assert!(!groups_contain(&groups, orphan));
  }

  #[test]
  fn empty_snapshot_contains_nothing() {
    let mut files: SlotMap<FileId, HostsFile> = SlotMap::with_key();
    let a = files.insert(HostsFile::new("a"));
    assert!(!groups_contain(&[], a));
  }
}
