use crate::domain::{ResolvedTrack, SongRecord};
use crate::services::SkipReason;

/// Output port for per-song progress of the playlist pipeline.
///
/// The CLI prints these lines; tests use [`NoopReporter`].
pub trait ProgressReporter: Send + Sync {
  fn on_found(&self, song: &SongRecord, track: &ResolvedTrack);
  fn on_skipped(&self, song: &SongRecord, reason: &SkipReason);
  fn finish(&self, kept: usize, seen: usize);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
  fn on_found(&self, _song: &SongRecord, _track: &ResolvedTrack) {}
  fn on_skipped(&self, _song: &SongRecord, _reason: &SkipReason) {}
  fn finish(&self, _kept: usize, _seen: usize) {}
}
