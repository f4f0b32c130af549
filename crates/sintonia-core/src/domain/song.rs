use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ids::TrackId;
use crate::domain::presenter::PresenterId;

/// Canción candidata leída de una fuente (fichero o horario de radio).
///
/// Inmutable una vez leída. `presenter` solo existe para entradas de radio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
  pub artist: String,
  pub title: String,
  pub presenter: Option<PresenterId>,
}

impl SongRecord {
  pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
    Self { artist: artist.into(), title: title.into(), presenter: None }
  }

  pub fn with_presenter(mut self, presenter: PresenterId) -> Self {
    self.presenter = Some(presenter);
    self
  }
}

impl fmt::Display for SongRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.artist, self.title)
  }
}

/// Pista resuelta por el catálogo: identidad canónica más los nombres que el
/// catálogo tiene registrados (pueden diferir de los de la fuente).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrack {
  pub id: TrackId,
  pub artist: String,
  pub title: String,
}

impl fmt::Display for ResolvedTrack {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.artist, self.title)
  }
}
