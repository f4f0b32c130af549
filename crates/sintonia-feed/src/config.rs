use serde::{Deserialize, Serialize};
use sintonia_config::{ConfigBackend, ConfigError};

/// Sección `[feed]` de sintonia.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
  /// Descarta repeticiones del mismo artista y título (sin distinguir mayúsculas).
  pub dedup: bool,

  /// Máximo de canciones a emitir. 0 = sin límite.
  pub limit: usize,

  /// Pasa artista y título a "Title Case".
  pub title_case: bool,

  /// Sufijos que se eliminan del final del título, p. ej. `(novinka)`.
  pub title_suffixes: Vec<String>,
}

impl Default for FeedConfig {
  fn default() -> Self {
    Self { dedup: true, limit: 0, title_case: false, title_suffixes: vec!["(novinka)".into()] }
  }
}

impl FeedConfig {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_or_init("feed")
  }
}
