use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::TasteError;

/// Identidad normalizada de un presentador (DJ) de radio.
///
/// Los horarios de radio escriben el mismo nombre con mayúsculas o espacios
/// distintos, así que la clave se normaliza: espacios colapsados y minúsculas.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PresenterId(String);

impl PresenterId {
  pub fn normalize(raw: &str) -> Option<Self> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    if collapsed.is_empty() { None } else { Some(Self(collapsed)) }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl FromStr for PresenterId {
  type Err = TasteError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::normalize(s).ok_or(TasteError::EmptyPresenter)
  }
}

impl TryFrom<String> for PresenterId {
  type Error = TasteError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<PresenterId> for String {
  fn from(id: PresenterId) -> Self {
    id.0
  }
}

impl fmt::Display for PresenterId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Contadores acumulados de un presentador.
///
/// La puntuación no se almacena: se deriva siempre de los contadores.
/// Invariante: `preferred_hits + avoided_hits <= songs_observed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenterStats {
  songs_observed: u64,
  preferred_hits: u64,
  avoided_hits: u64,
}

impl PresenterStats {
  /// Rebuilds statistics from persisted counters, checking the invariant.
  pub fn new(songs_observed: u64, preferred_hits: u64, avoided_hits: u64) -> Result<Self, TasteError> {
    let hits = preferred_hits.checked_add(avoided_hits);
    if hits.is_none_or(|hits| hits > songs_observed) {
      return Err(TasteError::InvalidStats { songs_observed, preferred_hits, avoided_hits });
    }
    Ok(Self { songs_observed, preferred_hits, avoided_hits })
  }

  pub fn songs_observed(&self) -> u64 {
    self.songs_observed
  }

  pub fn preferred_hits(&self) -> u64 {
    self.preferred_hits
  }

  pub fn avoided_hits(&self) -> u64 {
    self.avoided_hits
  }

  /// `(preferred - avoided) / observed`, or `0.0` before the first song.
  pub fn score(&self) -> f64 {
    if self.songs_observed == 0 {
      return 0.0;
    }
    (self.preferred_hits as f64 - self.avoided_hits as f64) / self.songs_observed as f64
  }

  pub(crate) fn bump(&mut self, preferred: bool, avoided: bool) {
    self.songs_observed += 1;
    if preferred {
      self.preferred_hits += 1;
    } else if avoided {
      self.avoided_hits += 1;
    }
  }

  /// Adds the counters of `other`; used when folding one run into another.
  pub fn absorb(&mut self, other: &PresenterStats) {
    self.songs_observed += other.songs_observed;
    self.preferred_hits += other.preferred_hits;
    self.avoided_hits += other.avoided_hits;
  }
}
