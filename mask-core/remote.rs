//! Helpers for remote hosts sources: URL validation, update intervals, and
//! the remote section of the configuration.

use serde::{
  Deserialize,
  Serialize,
};
use url::Url;

/// Whether `text` names a usable remote hosts source.
///
/// Only http and https sources are accepted; everything else (ftp, file,
/// bare domains) is rejected before a download is ever attempted.
pub fn is_valid_source_url(text: &str) -> bool {
  (text.starts_with("http://") || text.starts_with("https://")) && Url::parse(text).is_ok()
}

/// Update-interval steps offered in preferences, as (position, minutes).
const INTERVALS: [(u8, u32); 9] = [
  (1, 5),
  (2, 15),
  (3, 30),
  (4, 60),
  (5, 120),
  (6, 300),
  (7, 600),
  (8, 1440),
  (9, 10080),
];

/// Display labels matching the nine interval positions.
pub const INTERVAL_LABELS: [&str; 9] = ["5m", "15m", "30m", "1h", "2h", "5h", "10h", "24h", "7d"];

/// How often a remote source is re-downloaded.
///
/// Stored as minutes; the preferences slider exposes nine fixed positions.
/// Unknown minute values map back to the first position rather than an
/// out-of-range one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateInterval {
  minutes: u32,
}

impl UpdateInterval {
  pub fn from_minutes(minutes: u32) -> Self {
    Self { minutes }
  }

  /// The interval for a slider position (1-9); out-of-range positions fall
  /// back to the shortest interval.
  pub fn from_position(position: u8) -> Self {
    let minutes = INTERVALS
      .iter()
      .find(|(pos, _)| *pos == position)
      .map(|(_, minutes)| *minutes)
      .unwrap_or(INTERVALS[0].1);
    Self { minutes }
  }

  pub fn minutes(self) -> u32 {
    self.minutes
  }

  /// The slider position (1-9) for this interval; unknown values fall back
  /// to the first position.
  pub fn position(self) -> u8 {
    INTERVALS
      .iter()
      .find(|(_, minutes)| *minutes == self.minutes)
      .map(|(pos, _)| *pos)
      .unwrap_or(1)
  }

  pub fn label(self) -> &'static str {
    INTERVAL_LABELS[self.position() as usize - 1]
  }
}

impl Default for UpdateInterval {
  fn default() -> Self {
    Self::from_position(1)
  }
}

/// Remote-source defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RemoteConfig {
  pub enable:          bool,
  pub update_interval: UpdateInterval,
}

impl Default for RemoteConfig {
  fn default() -> Self {
    Self {
      enable:          true,
      update_interval: UpdateInterval::default(),
    }
  }
}
