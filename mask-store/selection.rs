/// Originator tagging for selection writes.
///
/// Selection flows in both directions: the sidebar writes it when the user
/// clicks a row, and the catalog writes it when a load or an explicit
/// should-select lands. Without tagging, a model-originated write would be
/// indistinguishable from a user click and would be forwarded straight back
/// into the catalog's `select`, which acknowledges with another
/// should-select: an endless echo.
///
/// The bridge holds a single flag: while a model-originated write is being
/// applied, UI-side handling must not forward the selection to the catalog.
#[derive(Debug, Default)]
pub struct SelectionBridge {
  applying_from_model: bool,
}

impl SelectionBridge {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run a model-originated selection write with the guard held.
  ///
  /// The flag is only set for the duration of `write`; anything the write
  /// triggers asynchronously lands in a later quantum and sees the guard
  /// released.
  pub fn apply_from_model<R>(&mut self, write: impl FnOnce() -> R) -> R {
    self.applying_from_model = true;
    let result = write();
    self.applying_from_model = false;
    result
  }

  /// Whether a model-originated write is currently in flight.
  pub fn is_applying_from_model(&self) -> bool {
    self.applying_from_model
  }
}
