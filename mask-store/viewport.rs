use hostmask_core::FileId;
use ropey::Rope;

/// Outcome of a viewport reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
  /// The viewport buffer must be replaced with the candidate contents.
  Replace,
  /// The buffer already matches; leave it untouched.
  Keep,
}

/// Per-viewport guard against redundant buffer replacement.
///
/// Hosts files run to multiple megabytes, and the view reconciles on every
/// observable change, most of which (busy flips, count changes, row
/// attribute updates) leave the visible text untouched. Comparing the full
/// buffer against the candidate on each pass would make every incidental
/// event O(n). The guard keeps the last bound file and the last observed
/// refresh token, and only walks the text when the same file's token
/// advanced with an unchanged length.
///
/// The bound [`FileId`] may go stale when the file is removed; a stale
/// handle simply compares unequal to every later candidate (generational
/// keys are never reused), so the next reconciliation sees "file changed"
/// rather than a fault.
#[derive(Debug, Default)]
pub struct ContentSyncState {
  bound:          Option<FileId>,
  observed_token: u64,
}

impl ContentSyncState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Decide whether `buffer` must be replaced with `contents`.
  ///
  /// - A different candidate file (or None) always replaces: O(1).
  /// - The same file with an advanced token replaces only if the text
  ///   really differs; a length mismatch short-circuits the comparison.
  /// - The same file at the same token is a no-op: O(1).
  ///
  /// The caller must honor a [`SyncDecision::Replace`] before the next
  /// pass: both fields advance on every branch that inspected them, so a
  /// `Keep` at this token means "buffer verified in sync".
  pub fn reconcile(
    &mut self,
    candidate: Option<FileId>,
    token: u64,
    contents: &Rope,
    buffer: &Rope,
  ) -> SyncDecision {
    if candidate != self.bound {
      self.bound = candidate;
      self.observed_token = token;
      return SyncDecision::Replace;
    }

    if token != self.observed_token {
      self.observed_token = token;
      if !ropes_equal(buffer, contents) {
        return SyncDecision::Replace;
      }
    }

    SyncDecision::Keep
  }
}

/// Byte-wise rope equality without allocating either side.
///
/// Lengths are compared first; the chunk walk only runs on equal lengths,
/// and chunk boundaries need not line up between the two ropes.
fn ropes_equal(a: &Rope, b: &Rope) -> bool {
  if a.len_bytes() != b.len_bytes() {
    return false;
  }

  let mut left: &[u8] = &[];
  let mut right: &[u8] = &[];
  let mut left_chunks = a.chunks();
  let mut right_chunks = b.chunks();

  loop {
    if left.is_empty() {
      left = match left_chunks.next() {
        Some(chunk) => chunk.as_bytes(),
        // Equal total lengths: both sides exhaust together.
        None => return true,
      };
    }
    if right.is_empty() {
      right = match right_chunks.next() {
        Some(chunk) => chunk.as_bytes(),
        None => return true,
      };
    }

    let common = left.len().min(right.len());
    if left[..common] != right[..common] {
      return false;
    }
    left = &left[common..];
    right = &right[common..];
  }
}
