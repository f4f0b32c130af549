use serde::{Deserialize, Serialize};

use crate::domain::{CollectionId, TrackId};

/// Largest batch a collection writer accepts in a single append.
pub const MAX_BATCH: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
  #[error("authentication failed: {0}")]
  Auth(String),

  #[error("network error: {0}")]
  Network(String),

  #[error("batch of {0} tracks exceeds the limit of {MAX_BATCH}")]
  BatchTooLarge(usize),

  #[error("io error: {0}")]
  Io(String),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Lo que el usuario pide crear: nombre, visibilidad y descripción.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
  pub name: String,
  pub description: String,
  pub public: bool,
}

/// Colección ya creada. `location` es lo que se le enseña al usuario
/// (una URL o una ruta de fichero, según el adapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionHandle {
  pub id: CollectionId,
  pub location: String,
}

/// Port que materializa una colección ordenada de pistas.
#[async_trait::async_trait]
pub trait CollectionWriter: Send + Sync {
  async fn create(&self, spec: &CollectionSpec) -> Result<CollectionHandle, WriterError>;

  /// Appends `batch` in order. Callers never pass more than [`MAX_BATCH`] ids.
  async fn append(&self, collection: &CollectionHandle, batch: &[TrackId]) -> Result<(), WriterError>;
}
