use std::sync::Arc;

use crate::domain::{GenreSet, ResolvedTrack};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("authentication failed: {0}")]
  Auth(String),

  #[error("network error: {0}")]
  Network(String),

  #[error("rate limited by catalog service")]
  RateLimited { retry_after_secs: Option<u64> },

  #[error("catalog unavailable: {0}")]
  Unavailable(String),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port que resuelve canciones contra un catálogo musical externo.
///
/// Implementaciones posibles:
/// - un catálogo local en TOML (offline, tests)
/// - la API de un servicio de streaming
///
/// Una canción sin coincidencia no es un error: se devuelve `Ok(None)`.
/// Un artista sin géneros conocidos devuelve un [`GenreSet`] vacío.
#[async_trait::async_trait]
pub trait CatalogLookup: Send + Sync {
  async fn resolve(&self, artist: &str, title: &str) -> Result<Option<ResolvedTrack>, CatalogError>;

  async fn genres_of(&self, artist: &str) -> Result<GenreSet, CatalogError>;
}

#[async_trait::async_trait]
impl<T: CatalogLookup + ?Sized> CatalogLookup for Arc<T> {
  async fn resolve(&self, artist: &str, title: &str) -> Result<Option<ResolvedTrack>, CatalogError> {
    (**self).resolve(artist, title).await
  }

  async fn genres_of(&self, artist: &str) -> Result<GenreSet, CatalogError> {
    (**self).genres_of(artist).await
  }
}
