use serde::Serialize;
use serde::de::DeserializeOwned;
use toml_edit::{DocumentMut, Item};
use tracing::{debug, info};

use crate::paths::{ConfigError, SintoniaPaths};

/// Acceso por secciones a `sintonia.toml`.
pub trait ConfigBackend {
  /// `Ok(None)` si no existe el fichero o la sección.
  fn read_section<T: DeserializeOwned>(&self, section: &str) -> Result<Option<T>, ConfigError>;

  /// Reemplaza la sección preservando el resto del documento.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  fn load_section<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    Ok(self.read_section(section)?.unwrap_or_default())
  }

  /// Like [`ConfigBackend::load_section`], but writes the defaults back when
  /// the section is absent so the user has something to edit.
  fn load_or_init<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    if let Some(value) = self.read_section(section)? {
      return Ok(value);
    }
    let value = T::default();
    self.save_section(section, &value)?;
    info!(section, "config section initialised with defaults");
    Ok(value)
  }
}

pub struct TomlConfigBackend {
  paths: SintoniaPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: SintoniaPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &SintoniaPaths {
    &self.paths
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn read_section<T: DeserializeOwned>(&self, section: &str) -> Result<Option<T>, ConfigError> {
    let path = self.paths.config_file();
    let Some(content) = sintonia_fs::read_optional(&path)? else {
      debug!(path = %path.display(), "no config file");
      return Ok(None);
    };

    let mut root: toml::Table = toml::from_str(&content)?;
    let Some(table) = root.remove(section) else {
      return Ok(None);
    };

    let value = table
      .try_into()
      .map_err(|e| ConfigError::Section { section: section.to_string(), reason: e.to_string() })?;
    Ok(Some(value))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    let mut doc: DocumentMut = match sintonia_fs::read_optional(&path)? {
      Some(content) => content.parse().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      None => DocumentMut::new(),
    };

    // `toml` renders the section body without a header; toml_edit turns it
    // back into a table item we can splice in.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Section { section: section.to_string(), reason: e.to_string() })?;
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;
    sintonia_fs::atomic_write_str(&path, &doc.to_string())?;

    debug!(path = %path.display(), section, "config section saved");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  #[serde(default)]
  struct FeedSection {
    dedup: bool,
    limit: usize,
    title_suffixes: Vec<String>,
  }

  fn backend() -> (tempfile::TempDir, TomlConfigBackend) {
    let tmp = tempdir().unwrap();
    let paths = SintoniaPaths::portable(tmp.path()).unwrap();
    (tmp, TomlConfigBackend::new(paths))
  }

  #[test]
  fn missing_file_or_section_reads_defaults() {
    let (_tmp, backend) = backend();
    assert_eq!(backend.read_section::<FeedSection>("feed").unwrap(), None);
    assert_eq!(backend.load_section::<FeedSection>("feed").unwrap(), FeedSection::default());

    std::fs::write(backend.paths().config_file(), "[storage]\nstore_path = \"x.toml\"\n").unwrap();
    assert_eq!(backend.load_section::<FeedSection>("feed").unwrap(), FeedSection::default());
  }

  #[test]
  fn save_keeps_other_sections_and_comments() {
    let (_tmp, backend) = backend();
    let file = backend.paths().config_file();
    std::fs::write(&file, "# my settings\n[storage]\nstore_path = \"x.toml\" # keep me\n").unwrap();

    let section = FeedSection { dedup: true, limit: 20, title_suffixes: vec!["(novinka)".into()] };
    backend.save_section("feed", &section).unwrap();

    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("# my settings"));
    assert!(written.contains("# keep me"));
    assert_eq!(backend.load_section::<FeedSection>("feed").unwrap(), section);
  }

  #[test]
  fn load_or_init_materialises_defaults() {
    let (_tmp, backend) = backend();

    let loaded: FeedSection = backend.load_or_init("feed").unwrap();

    assert_eq!(loaded, FeedSection::default());
    assert!(backend.read_section::<FeedSection>("feed").unwrap().is_some());
  }

  #[test]
  fn broken_file_is_an_error() {
    let (_tmp, backend) = backend();
    std::fs::write(backend.paths().config_file(), "[feed\nlimit = ").unwrap();
    assert!(matches!(backend.load_section::<FeedSection>("feed"), Err(ConfigError::Toml(_))));

    std::fs::write(backend.paths().config_file(), "[feed]\nlimit = \"many\"\n").unwrap();
    assert!(matches!(backend.load_section::<FeedSection>("feed"), Err(ConfigError::Section { .. })));
  }
}
