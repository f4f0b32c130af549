//! In-memory collaborators shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::StreamExt;
use futures::stream::{self, BoxStream};

use crate::domain::{CollectionId, GenreSet, PresenterId, ResolvedTrack, SongRecord, TrackId};
use crate::ports::{
  CatalogError, CatalogLookup, CollectionHandle, CollectionSpec, CollectionWriter, FeedError, SourceFeed, WriterError,
};

#[derive(Default)]
pub struct FakeCatalog {
  tracks: HashMap<(String, String), ResolvedTrack>,
  genres: HashMap<String, Vec<String>>,
  offline: bool,
  lookups: AtomicUsize,
}

impl FakeCatalog {
  pub fn with(mut self, artist: &str, title: &str, genres: &[&str]) -> Self {
    let id = TrackId::new(format!("track:{}", self.tracks.len() + 1));
    let track = ResolvedTrack { id, artist: artist.to_string(), title: title.to_string() };
    self.tracks.insert((artist.to_string(), title.to_string()), track);
    self.genres.insert(artist.to_string(), genres.iter().map(|g| g.to_string()).collect());
    self
  }

  pub fn offline() -> Self {
    Self { offline: true, ..Self::default() }
  }

  pub fn lookups(&self) -> usize {
    self.lookups.load(Ordering::SeqCst)
  }
}

#[async_trait::async_trait]
impl CatalogLookup for FakeCatalog {
  async fn resolve(&self, artist: &str, title: &str) -> Result<Option<ResolvedTrack>, CatalogError> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    if self.offline {
      return Err(CatalogError::Network("connection refused".into()));
    }
    Ok(self.tracks.get(&(artist.to_string(), title.to_string())).cloned())
  }

  async fn genres_of(&self, artist: &str) -> Result<GenreSet, CatalogError> {
    if self.offline {
      return Err(CatalogError::Network("connection refused".into()));
    }
    Ok(self.genres.get(artist).map(GenreSet::from_raw).unwrap_or_default())
  }
}

pub struct VecFeed(pub Vec<SongRecord>);

impl SourceFeed for VecFeed {
  fn records(&self) -> BoxStream<'_, Result<SongRecord, FeedError>> {
    stream::iter(self.0.clone().into_iter().map(Ok)).boxed()
  }
}

#[derive(Default)]
pub struct RecordingWriter {
  pub created: Mutex<Vec<CollectionSpec>>,
  pub batches: Mutex<Vec<Vec<TrackId>>>,
}

#[async_trait::async_trait]
impl CollectionWriter for RecordingWriter {
  async fn create(&self, spec: &CollectionSpec) -> Result<CollectionHandle, WriterError> {
    self.created.lock().unwrap().push(spec.clone());
    Ok(CollectionHandle { id: CollectionId::new("c1"), location: "memory://c1".into() })
  }

  async fn append(&self, _collection: &CollectionHandle, batch: &[TrackId]) -> Result<(), WriterError> {
    self.batches.lock().unwrap().push(batch.to_vec());
    Ok(())
  }
}

pub fn dj(name: &str) -> PresenterId {
  name.parse().unwrap()
}

pub fn song(artist: &str, title: &str, presenter: Option<&str>) -> SongRecord {
  let record = SongRecord::new(artist, title);
  match presenter {
    Some(name) => record.with_presenter(dj(name)),
    None => record,
  }
}
