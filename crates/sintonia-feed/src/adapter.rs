use std::path::{Path, PathBuf};

use futures::future;
use futures::stream::{BoxStream, StreamExt};
use sintonia_core::domain::SongRecord;
use sintonia_core::ports::{FeedError, SourceFeed};
use tracing::debug;

use crate::config::FeedConfig;
use crate::parser::{LineParser, Step};

/// `SourceFeed` sobre un fichero de texto con una canción por línea.
///
/// No guarda nada en memoria: cada llamada a `records` reabre el fichero y lo
/// recorre desde el principio.
#[derive(Debug, Clone)]
pub struct FileFeed {
  path: PathBuf,
  config: FeedConfig,
}

impl FileFeed {
  /// Fails early if `path` is not a readable file.
  pub fn open(path: impl Into<PathBuf>, config: FeedConfig) -> Result<Self, FeedError> {
    let path = path.into();
    if !std::fs::metadata(&path)?.is_file() {
      return Err(FeedError::Invalid(format!("{} is not a file", path.display())));
    }
    debug!(path = %path.display(), ?config, "song list opened");
    Ok(Self { path, config })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl SourceFeed for FileFeed {
  fn records(&self) -> BoxStream<'_, Result<SongRecord, FeedError>> {
    sintonia_fs::read_lines(self.path.clone())
      .scan(LineParser::new(&self.config), |parser, line| {
        let step = match line {
          Err(e) => Some(Some(Err(FeedError::Io(e)))),
          Ok(line) => match parser.push(&line) {
            Step::Song(record) => Some(Some(Ok(record))),
            Step::Skip => Some(None),
            Step::Done => None,
          },
        };
        future::ready(step)
      })
      .filter_map(future::ready)
      .boxed()
  }
}
