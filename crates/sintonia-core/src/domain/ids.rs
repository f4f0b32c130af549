use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de una pista en el catálogo externo (URI, id numérico...).
///
/// Es opaco: solo el adapter del catálogo sabe interpretarlo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(String);

impl TrackId {
  pub fn new(id: impl Into<String>) -> Self {
    TrackId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for TrackId {
  fn from(s: String) -> Self {
    TrackId(s)
  }
}

impl fmt::Display for TrackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador de la colección (playlist) creada por el writer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(String);

impl CollectionId {
  pub fn new(id: impl Into<String>) -> Self {
    CollectionId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CollectionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
