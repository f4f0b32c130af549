use std::fmt;

use futures::StreamExt;
use tracing::{debug, info};

use crate::domain::{GenreTerm, PresenterId, ResolvedTrack, SongRecord, TrackId};
use crate::errors::CoreError;
use crate::ports::{
  CatalogLookup, CollectionHandle, CollectionSpec, CollectionWriter, MAX_BATCH, ProgressReporter, SourceFeed,
};
use crate::taste::{GenreMatcher, PresenterGate, Tier};

/// Why a candidate song did not make it into the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  /// The catalog had no match for artist and title.
  Unresolved,
  /// The artist carries a genre containing an excluded term.
  ExcludedGenre { genre: GenreTerm, term: GenreTerm },
  /// The song's presenter did not pass the presenter filter.
  Presenter { presenter: PresenterId, tier: Tier },
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::Unresolved => write!(f, "not found"),
      SkipReason::ExcludedGenre { genre, .. } => write!(f, "genre '{genre}'"),
      SkipReason::Presenter { presenter, tier } => write!(f, "presenter '{presenter}' is {tier}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSong {
  pub song: SongRecord,
  pub reason: SkipReason,
}

/// Filters applied while assembling a playlist.
#[derive(Debug, Clone, Default)]
pub struct SelectionRules {
  /// Artists with a genre matching any of these terms are dropped.
  pub exclude: GenreMatcher,
  /// When set, songs attributed to a presenter must pass this gate.
  /// Songs without a presenter are never filtered by it.
  pub presenters: Option<PresenterGate>,
}

/// Result of walking a feed: surviving tracks in feed order plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
  pub tracks: Vec<ResolvedTrack>,
  pub skipped: Vec<SkippedSong>,
  pub seen: usize,
}

impl Assembly {
  pub fn track_ids(&self) -> Vec<TrackId> {
    self.tracks.iter().map(|t| t.id.clone()).collect()
  }
}

pub struct PlaylistService<C, W, R>
where
  C: CatalogLookup,
  W: CollectionWriter,
  R: ProgressReporter,
{
  catalog: C,
  writer: W,
  reporter: R,
}

impl<C, W, R> PlaylistService<C, W, R>
where
  C: CatalogLookup,
  W: CollectionWriter,
  R: ProgressReporter,
{
  pub fn new(catalog: C, writer: W, reporter: R) -> Self {
    Self { catalog, writer, reporter }
  }

  /// Resolves every song of `feed` in order and applies `rules`.
  ///
  /// Unresolvable songs are skipped; catalog failures abort the whole walk.
  pub async fn assemble<F>(&self, feed: &F, rules: &SelectionRules) -> Result<Assembly, CoreError>
  where
    F: SourceFeed + ?Sized,
  {
    let mut records = feed.records();
    let mut assembly = Assembly::default();

    while let Some(record) = records.next().await {
      let song = record?;
      assembly.seen += 1;

      match self.select(&song, rules).await? {
        Ok(track) => {
          debug!(song = %song, track = %track.id, "song kept");
          self.reporter.on_found(&song, &track);
          assembly.tracks.push(track);
        }
        Err(reason) => {
          debug!(song = %song, reason = %reason, "song skipped");
          self.reporter.on_skipped(&song, &reason);
          assembly.skipped.push(SkippedSong { song, reason });
        }
      }
    }

    self.reporter.finish(assembly.tracks.len(), assembly.seen);
    info!(kept = assembly.tracks.len(), seen = assembly.seen, "playlist assembled");
    Ok(assembly)
  }

  async fn select(
    &self,
    song: &SongRecord,
    rules: &SelectionRules,
  ) -> Result<Result<ResolvedTrack, SkipReason>, CoreError> {
    // Presenter first: it needs no catalog round trip.
    if let (Some(gate), Some(presenter)) = (&rules.presenters, &song.presenter) {
      if !gate.admits(presenter) {
        return Ok(Err(SkipReason::Presenter { presenter: presenter.clone(), tier: gate.tier(presenter) }));
      }
    }

    let Some(track) = self.catalog.resolve(&song.artist, &song.title).await? else {
      return Ok(Err(SkipReason::Unresolved));
    };

    if !rules.exclude.is_empty() {
      let genres = self.catalog.genres_of(&track.artist).await?;
      if let Some(hit) = rules.exclude.first_match(&genres) {
        return Ok(Err(SkipReason::ExcludedGenre { genre: hit.genre.clone(), term: hit.term.clone() }));
      }
    }

    Ok(Ok(track))
  }

  /// Creates the collection and appends `tracks` in batches of [`MAX_BATCH`].
  pub async fn publish(&self, tracks: &[TrackId], spec: &CollectionSpec) -> Result<CollectionHandle, CoreError> {
    if tracks.is_empty() {
      return Err(CoreError::NoTracks);
    }

    let handle = self.writer.create(spec).await?;
    info!(collection = %handle.id, name = %spec.name, "collection created");

    for (i, batch) in tracks.chunks(MAX_BATCH).enumerate() {
      self.writer.append(&handle, batch).await?;
      debug!(batch = i, size = batch.len(), "batch appended");
    }

    info!(collection = %handle.id, tracks = tracks.len(), "collection populated");
    Ok(handle)
  }
}
