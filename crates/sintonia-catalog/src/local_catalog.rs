use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use sintonia_core::domain::{GenreSet, ResolvedTrack, TrackId};
use sintonia_core::ports::{CatalogError, CatalogLookup};
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackRow {
  id: String,
  artist: String,
  title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogFile {
  tracks: Vec<TrackRow>,
  artists: HashMap<String, Vec<String>>,
}

fn key(text: &str) -> String {
  text.trim().to_lowercase()
}

/// Catálogo offline leído de un fichero TOML.
///
/// ```toml
/// [[tracks]]
/// id = "local:daft-punk/get-lucky"
/// artist = "Daft Punk"
/// title = "Get Lucky"
///
/// [artists]
/// "Daft Punk" = ["French House", "Electronic"]
/// ```
///
/// Artistas y títulos se comparan sin distinguir mayúsculas.
#[derive(Debug, Default)]
pub struct LocalCatalog {
  tracks: HashMap<(String, String), ResolvedTrack>,
  genres: HashMap<String, GenreSet>,
}

impl LocalCatalog {
  pub fn open(path: &Path) -> Result<Self, CatalogError> {
    let content = sintonia_fs::read_optional(path)
      .map_err(|e| CatalogError::Unavailable(format!("{}: {e}", path.display())))?
      .ok_or_else(|| CatalogError::Unavailable(format!("catalog file {} does not exist", path.display())))?;

    let catalog = Self::from_toml(&content)
      .map_err(|e| CatalogError::Unavailable(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), tracks = catalog.tracks.len(), artists = catalog.genres.len(), "catalog loaded");
    Ok(catalog)
  }

  pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
    let file: CatalogFile = toml::from_str(content)?;
    let mut catalog = Self::default();

    for row in file.tracks {
      let track = ResolvedTrack { id: TrackId::new(row.id), artist: row.artist, title: row.title };
      let slot = (key(&track.artist), key(&track.title));
      if catalog.tracks.contains_key(&slot) {
        warn!(track = %track, "duplicate catalog entry ignored");
        continue;
      }
      catalog.tracks.insert(slot, track);
    }

    for (artist, raw) in file.artists {
      let known = catalog.genres.entry(key(&artist)).or_default();
      for genre in GenreSet::from_raw(&raw).iter() {
        known.insert(genre.clone());
      }
    }

    Ok(catalog)
  }

  pub fn len(&self) -> usize {
    self.tracks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tracks.is_empty()
  }
}

#[async_trait]
impl CatalogLookup for LocalCatalog {
  async fn resolve(&self, artist: &str, title: &str) -> Result<Option<ResolvedTrack>, CatalogError> {
    let hit = self.tracks.get(&(key(artist), key(title))).cloned();
    debug!(artist, title, found = hit.is_some(), "catalog lookup");
    Ok(hit)
  }

  async fn genres_of(&self, artist: &str) -> Result<GenreSet, CatalogError> {
    Ok(self.genres.get(&key(artist)).cloned().unwrap_or_default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  const CATALOG: &str = r#"
[[tracks]]
id = "t1"
artist = "Daft Punk"
title = "Get Lucky"

[[tracks]]
id = "t2"
artist = "Kollegah"
title = "Alpha"

[[tracks]]
id = "t3"
artist = "daft punk"
title = "get lucky"

[artists]
"Daft Punk" = ["French House", "  ", "Electronic"]
"KOLLEGAH" = ["German Hip Hop"]
"#;

  #[tokio::test]
  async fn resolves_ignoring_case() {
    let catalog = LocalCatalog::from_toml(CATALOG).unwrap();

    let track = catalog.resolve("DAFT PUNK", " get lucky ").await.unwrap().unwrap();
    assert_eq!(track.id, TrackId::new("t1"));
    assert_eq!(track.title, "Get Lucky");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.resolve("Daft Punk", "Around the World").await.unwrap(), None);
  }

  #[tokio::test]
  async fn genres_are_normalised() {
    let catalog = LocalCatalog::from_toml(CATALOG).unwrap();

    assert_eq!(catalog.genres_of("daft punk").await.unwrap().to_string(), "french house, electronic");
    assert_eq!(catalog.genres_of("Kollegah").await.unwrap().to_string(), "german hip hop");
    assert!(catalog.genres_of("Nobody").await.unwrap().is_empty());
  }

  #[test]
  fn missing_or_broken_file_is_unavailable() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("catalog.toml");
    assert!(matches!(LocalCatalog::open(&path), Err(CatalogError::Unavailable(_))));

    std::fs::write(&path, "[[tracks]]\nid = 1\n").unwrap();
    assert!(matches!(LocalCatalog::open(&path), Err(CatalogError::Unavailable(_))));

    std::fs::write(&path, CATALOG).unwrap();
    assert_eq!(LocalCatalog::open(&path).unwrap().len(), 2);
  }
}
