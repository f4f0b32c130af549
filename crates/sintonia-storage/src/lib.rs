mod config;
mod models;

use std::path::{Path, PathBuf};

use sintonia_core::domain::{PresenterId, PresenterStats};
use sintonia_core::ports::{StoreError, TasteStore};
use sintonia_core::taste::TasteBook;
use tracing::{debug, info};

use crate::models::{CountsRow, FORMAT_VERSION, RawCountsRow, TasteFile};

pub use config::StorageConfig;

/// `TasteStore` respaldado por un fichero TOML.
///
/// ```toml
/// version = 1
///
/// [presenters."morning show"]
/// songs_observed = 12
/// preferred_hits = 7
/// avoided_hits = 1
/// ```
///
/// Las puntuaciones no se guardan. El orden de los presentadores en el fichero
/// es el orden de inserción del [`TasteBook`].
#[derive(Debug, Clone)]
pub struct FileTasteStore {
  path: PathBuf,
}

impl FileTasteStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn malformed(&self, reason: impl Into<String>) -> StoreError {
    StoreError::Malformed { path: self.path.clone(), reason: reason.into() }
  }

  fn io(&self, source: std::io::Error) -> StoreError {
    StoreError::Io { path: self.path.clone(), source }
  }

  fn decode(&self, content: &str) -> Result<TasteBook, StoreError> {
    let mut root: toml::Table = toml::from_str(content).map_err(|e| self.malformed(e.to_string()))?;

    match root.remove("version") {
      Some(toml::Value::Integer(FORMAT_VERSION)) => {}
      Some(other) => return Err(self.malformed(format!("unsupported format version {other}"))),
      None => return Err(self.malformed("missing format version")),
    }

    let presenters = match root.remove("presenters") {
      Some(toml::Value::Table(table)) => table,
      Some(_) => return Err(self.malformed("`presenters` must be a table")),
      None => toml::Table::new(),
    };
    if let Some(key) = root.keys().next() {
      return Err(self.malformed(format!("unexpected key `{key}`")));
    }

    let mut book = TasteBook::new();
    for (name, value) in presenters {
      let presenter: PresenterId = name.parse().map_err(|e| self.malformed(format!("presenter `{name}`: {e}")))?;
      let row: RawCountsRow = value.try_into().map_err(|e| self.malformed(format!("presenter `{name}`: {e}")))?;

      let count =
        |n: i64| u64::try_from(n).map_err(|_| self.malformed(format!("presenter `{name}`: negative count {n}")));
      let stats = PresenterStats::new(count(row.songs_observed)?, count(row.preferred_hits)?, count(row.avoided_hits)?)
        .map_err(|e| self.malformed(format!("presenter `{name}`: {e}")))?;

      if book.contains(&presenter) {
        return Err(self.malformed(format!("presenter `{name}` appears twice")));
      }
      book.insert(presenter, stats);
    }
    Ok(book)
  }

  fn encode(&self, book: &TasteBook) -> Result<String, StoreError> {
    let mut presenters = toml::Table::new();
    for (presenter, stats) in book.iter() {
      let row = CountsRow {
        songs_observed: stats.songs_observed(),
        preferred_hits: stats.preferred_hits(),
        avoided_hits: stats.avoided_hits(),
      };
      let value = toml::Value::try_from(row).map_err(|e| StoreError::Internal(format!("encode {presenter}: {e}")))?;
      presenters.insert(presenter.as_str().to_string(), value);
    }

    toml::to_string(&TasteFile { version: FORMAT_VERSION, presenters })
      .map_err(|e| StoreError::Internal(format!("encode taste store: {e}")))
  }
}

impl TasteStore for FileTasteStore {
  fn load(&self) -> Result<TasteBook, StoreError> {
    let Some(content) = sintonia_fs::read_optional(&self.path).map_err(|e| self.io(e))? else {
      debug!(path = %self.path.display(), "no taste store yet, starting empty");
      return Ok(TasteBook::new());
    };

    let book = self.decode(&content)?;
    debug!(path = %self.path.display(), presenters = book.len(), "taste store loaded");
    Ok(book)
  }

  fn save(&self, book: &TasteBook) -> Result<(), StoreError> {
    let content = self.encode(book)?;
    sintonia_fs::atomic_write_str(&self.path, &content).map_err(|e| self.io(e))?;
    info!(path = %self.path.display(), presenters = book.len(), "taste store saved");
    Ok(())
  }
}
