use serde::{Deserialize, Serialize};
use sintonia_config::{ConfigBackend, ConfigError, SintoniaPaths};
use std::path::{Path, PathBuf};

/// Sección `[catalog]`: de dónde se resuelven canciones y dónde se escriben las listas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
  /// Relativa al directorio de datos; por defecto `catalog.toml`.
  pub catalog_path: Option<PathBuf>,
  /// Relativa al directorio de datos; por defecto `playlists/`.
  pub output_dir: Option<PathBuf>,
}

impl CatalogConfig {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_or_init("catalog")
  }

  pub fn catalog_file(&self, paths: &SintoniaPaths) -> PathBuf {
    paths.in_data_dir(self.catalog_path.as_deref().unwrap_or(Path::new("catalog.toml")))
  }

  pub fn output_dir(&self, paths: &SintoniaPaths) -> PathBuf {
    paths.in_data_dir(self.output_dir.as_deref().unwrap_or(Path::new("playlists")))
  }
}
