use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

/// Variable de entorno que activa el modo portable.
pub const BASE_DIR_ENV: &str = "SINTONIA_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("invalid section [{section}]: {reason}")]
  Section { section: String, reason: String },
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct SintoniaPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl SintoniaPaths {
  /// Resuelve los directorios del usuario, o los de `SINTONIA_BASE_DIR` si está definida.
  pub fn detect() -> Result<Self, ConfigError> {
    match std::env::var_os(BASE_DIR_ENV) {
      Some(base) => Self::portable(base),
      None => {
        let dirs = ProjectDirs::from("com", "sintonia", "sintonia").ok_or(ConfigError::Directories)?;
        Self {
          base_dir: dirs.config_dir().to_path_buf(),
          config_dir: dirs.config_dir().to_path_buf(),
          data_dir: dirs.data_dir().to_path_buf(),
          cache_dir: dirs.cache_dir().to_path_buf(),
        }
        .created()
      }
    }
  }

  /// Todo cuelga de `base`: `config/`, `data/` y `cache/`.
  pub fn portable(base: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let base: PathBuf = base.into();
    Self {
      config_dir: base.join("config"),
      data_dir: base.join("data"),
      cache_dir: base.join("cache"),
      base_dir: base,
    }
    .created()
  }

  fn created(self) -> Result<Self, ConfigError> {
    for dir in [&self.config_dir, &self.data_dir, &self.cache_dir] {
      std::fs::create_dir_all(dir)?;
    }
    Ok(self)
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("sintonia.toml")
  }

  /// Joins `path` onto the data dir unless it is already absolute.
  pub fn in_data_dir(&self, path: &Path) -> PathBuf {
    self.data_dir.join(path)
  }
}
