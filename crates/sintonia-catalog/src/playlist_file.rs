use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sintonia_core::domain::{CollectionId, TrackId};
use sintonia_core::ports::{CollectionHandle, CollectionSpec, CollectionWriter, MAX_BATCH, WriterError};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// File-name-safe form of a playlist name: lowercase alphanumerics joined by `-`.
pub fn slugify(name: &str) -> String {
  let mut slug = String::with_capacity(name.len());
  for c in name.chars().flat_map(char::to_lowercase) {
    if c.is_alphanumeric() {
      slug.push(c);
    } else if !slug.is_empty() && !slug.ends_with('-') {
      slug.push('-');
    }
  }
  let slug = slug.trim_end_matches('-');
  if slug.is_empty() { "playlist".to_string() } else { slug.to_string() }
}

fn one_line(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `CollectionWriter` que materializa la lista como un `.m3u` en disco.
///
/// Re-crear una lista con el mismo nombre sobrescribe el fichero anterior.
#[derive(Debug, Clone)]
pub struct PlaylistFileWriter {
  output_dir: PathBuf,
}

impl PlaylistFileWriter {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self { output_dir: output_dir.into() }
  }

  pub fn output_dir(&self) -> &Path {
    &self.output_dir
  }

  fn file_for(&self, id: &CollectionId) -> PathBuf {
    self.output_dir.join(format!("{}.m3u", id.as_str()))
  }
}

fn io_error(path: &Path, e: std::io::Error) -> WriterError {
  WriterError::Io(format!("{}: {e}", path.display()))
}

#[async_trait]
impl CollectionWriter for PlaylistFileWriter {
  async fn create(&self, spec: &CollectionSpec) -> Result<CollectionHandle, WriterError> {
    let id = CollectionId::new(slugify(&spec.name));
    let path = self.file_for(&id);

    tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| io_error(&self.output_dir, e))?;

    let visibility = if spec.public { "public" } else { "private" };
    let header = format!(
      "#EXTM3U\n#PLAYLIST:{}\n#DESCRIPTION:{}\n#VISIBILITY:{visibility}\n",
      one_line(&spec.name),
      one_line(&spec.description)
    );
    tokio::fs::write(&path, header).await.map_err(|e| io_error(&path, e))?;

    info!(path = %path.display(), "playlist file created");
    Ok(CollectionHandle { id, location: path.display().to_string() })
  }

  async fn append(&self, collection: &CollectionHandle, batch: &[TrackId]) -> Result<(), WriterError> {
    if batch.len() > MAX_BATCH {
      return Err(WriterError::BatchTooLarge(batch.len()));
    }

    let path = self.file_for(&collection.id);
    let mut file = tokio::fs::OpenOptions::new().append(true).open(&path).await.map_err(|e| io_error(&path, e))?;

    let mut lines = String::new();
    for id in batch {
      lines.push_str(id.as_str());
      lines.push('\n');
    }
    file.write_all(lines.as_bytes()).await.map_err(|e| io_error(&path, e))?;
    file.flush().await.map_err(|e| io_error(&path, e))?;

    debug!(path = %path.display(), tracks = batch.len(), "tracks appended");
    Ok(())
  }
}
