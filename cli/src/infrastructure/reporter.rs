use sintonia_core::domain::{ResolvedTrack, SongRecord};
use sintonia_core::ports::ProgressReporter;
use sintonia_core::services::SkipReason;

/// A `ProgressReporter` that prints one line per song to stdout.
///
/// Diagnostics go through `tracing` to stderr; this is the user-facing output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
  pub fn skipped_line(song: &SongRecord, reason: &SkipReason) -> String {
    match reason {
      SkipReason::Unresolved => format!("  Not found: {song}"),
      other => format!("  Skipped ({other}): {song}"),
    }
  }
}

impl ProgressReporter for ConsoleReporter {
  fn on_found(&self, _song: &SongRecord, track: &ResolvedTrack) {
    println!("  Found: {} - {}", track.artist, track.title);
  }

  fn on_skipped(&self, song: &SongRecord, reason: &SkipReason) {
    println!("{}", Self::skipped_line(song, reason));
  }

  fn finish(&self, kept: usize, seen: usize) {
    println!("\nFound {kept} of {seen} tracks");
  }
}
