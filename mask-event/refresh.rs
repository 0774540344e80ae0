/// Per-quantum refresh coalescer.
///
/// A single external cascade (a download's start/progress/enable/save/exists
/// sequence) can publish on the order of ten row-refresh events back to
/// back. Re-rendering per raw event would recompute the whole view each
/// time, so requests made within one coordinator quantum collapse into one
/// token increment, flushed after the quantum's handlers have all run.
///
/// This is a pure debouncer: no request means no scheduled work and no
/// failure mode.
#[derive(Debug, Default)]
pub struct RefreshCoalescer {
  pending: bool,
  token:   u64,
}

impl RefreshCoalescer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Note that the view needs a refresh. Any number of calls within the
  /// same quantum are absorbed into the one already pending.
  pub fn request_refresh(&mut self) {
    self.pending = true;
  }

  /// The current refresh token. Monotonic; advances by exactly one per
  /// flushed quantum.
  pub fn token(&self) -> u64 {
    self.token
  }

  /// Flush at the end of a quantum. Returns the new token if a refresh was
  /// requested since the last flush, `None` otherwise.
  ///
  /// Requests made while the flushed token is being applied land in the
  /// next quantum; they are not folded into this one.
  pub fn flush(&mut self) -> Option<u64> {
    if !self.pending {
      return None;
    }
    self.pending = false;
    self.token += 1;
    Some(self.token)
  }
}
