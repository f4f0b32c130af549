use futures::stream::BoxStream;

use crate::domain::SongRecord;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid feed: {0}")]
  Invalid(String),
}

/// Port de origen de canciones candidatas.
///
/// La secuencia es finita, de orden estable y reiniciable: cada llamada a
/// [`SourceFeed::records`] vuelve a empezar desde el principio.
pub trait SourceFeed: Send + Sync {
  fn records(&self) -> BoxStream<'_, Result<SongRecord, FeedError>>;
}
