use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::TasteError;

/// Etiqueta de género tal y como la entrega el catálogo externo.
///
/// No hay taxonomía canónica: el valor se guarda ya normalizado (minúsculas,
/// sin espacios en los extremos) y nunca vacío, de modo que las comparaciones
/// posteriores son puramente léxicas.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GenreTerm(String);

impl GenreTerm {
  /// Normalizes `raw` and returns `None` when nothing is left.
  pub fn normalize(raw: &str) -> Option<Self> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() { None } else { Some(Self(normalized)) }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// `true` if `self` occurs anywhere inside `genre` (`"rap"` is in `"trap"`).
  pub fn is_part_of(&self, genre: &GenreTerm) -> bool {
    genre.0.contains(self.0.as_str())
  }
}

impl FromStr for GenreTerm {
  type Err = TasteError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::normalize(s).ok_or(TasteError::EmptyTerm)
  }
}

impl TryFrom<String> for GenreTerm {
  type Error = TasteError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<GenreTerm> for String {
  fn from(term: GenreTerm) -> Self {
    term.0
  }
}

impl fmt::Display for GenreTerm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Géneros asociados a un artista resuelto.
///
/// Conserva el orden del catálogo (para poder informar del primer género que
/// coincidió) y descarta duplicados. Puede estar vacío: artista desconocido.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSet(Vec<GenreTerm>);

impl GenreSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a set from raw catalog strings, dropping blanks and duplicates.
  pub fn from_raw<I, S>(raw: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    raw.into_iter().filter_map(|g| GenreTerm::normalize(g.as_ref())).collect()
  }

  pub fn insert(&mut self, genre: GenreTerm) {
    if !self.0.contains(&genre) {
      self.0.push(genre);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &GenreTerm> {
    self.0.iter()
  }
}

impl FromIterator<GenreTerm> for GenreSet {
  fn from_iter<T: IntoIterator<Item = GenreTerm>>(iter: T) -> Self {
    let mut set = GenreSet::new();
    for genre in iter {
      set.insert(genre);
    }
    set
  }
}

impl fmt::Display for GenreSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, genre) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(genre.as_str())?;
    }
    Ok(())
  }
}
