use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: i64 = 1;

/// Counters as written to disk.
#[derive(Debug, Serialize)]
pub struct CountsRow {
  pub songs_observed: u64,
  pub preferred_hits: u64,
  pub avoided_hits: u64,
}

/// Counters as read from disk. Signed, so negatives can be reported instead
/// of failing with a generic type error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCountsRow {
  pub songs_observed: i64,
  pub preferred_hits: i64,
  pub avoided_hits: i64,
}

#[derive(Debug, Serialize)]
pub struct TasteFile {
  pub version: i64,
  pub presenters: toml::Table,
}
