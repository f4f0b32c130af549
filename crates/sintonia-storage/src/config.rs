use serde::{Deserialize, Serialize};
use sintonia_config::{ConfigBackend, ConfigError, SintoniaPaths};
use std::path::{Path, PathBuf};

const DEFAULT_STORE_FILE: &str = "taste.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
  /// Ruta del almacén de gustos. Relativa al directorio de datos; por defecto `taste.toml`.
  pub store_path: Option<PathBuf>,
}

impl StorageConfig {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_or_init("storage")
  }

  pub fn store_file(&self, paths: &SintoniaPaths) -> PathBuf {
    let path = self.store_path.as_deref().unwrap_or(Path::new(DEFAULT_STORE_FILE));
    paths.in_data_dir(path)
  }
}
