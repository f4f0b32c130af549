use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{GenreSet, GenreTerm};
use crate::errors::TasteError;
use crate::taste::matcher::GenreMatcher;

pub const DEFAULT_PREFERRED_TERMS: &[&str] =
  &["rock", "indie", "alternative", "punk", "metal", "folk", "jazz", "blues", "soul", "funk", "shoegaze", "dream pop"];

pub const DEFAULT_AVOIDED_TERMS: &[&str] =
  &["rap", "hip hop", "trap", "drill", "reggaeton", "schlager", "eurodance", "dance pop"];

/// Outcome of observing one song of a presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observation {
  Preferred,
  Avoided,
  None,
}

impl fmt::Display for Observation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Observation::Preferred => "preferred",
      Observation::Avoided => "avoided",
      Observation::None => "none",
    };
    f.write_str(text)
  }
}

/// Preferred and avoided vocabularies used to score presenters.
///
/// The preferred list always wins: a genre set hitting both lists (e.g.
/// `"rock rap"`) is observed as [`Observation::Preferred`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasteProfile {
  preferred: GenreMatcher,
  avoided: GenreMatcher,
}

impl TasteProfile {
  /// Fails with [`TasteError::OverlappingTerm`] if a term appears in both lists.
  pub fn new(preferred: Vec<GenreTerm>, avoided: Vec<GenreTerm>) -> Result<Self, TasteError> {
    if let Some(shared) = preferred.iter().find(|term| avoided.contains(term)) {
      return Err(TasteError::OverlappingTerm(shared.to_string()));
    }
    Ok(Self { preferred: GenreMatcher::new(preferred), avoided: GenreMatcher::new(avoided) })
  }

  /// Parses raw strings, rejecting blanks, then builds the profile.
  pub fn from_raw<S: AsRef<str>>(preferred: &[S], avoided: &[S]) -> Result<Self, TasteError> {
    let parse = |raw: &[S]| raw.iter().map(|t| t.as_ref().parse::<GenreTerm>()).collect::<Result<Vec<_>, _>>();
    Self::new(parse(preferred)?, parse(avoided)?)
  }

  pub fn preferred(&self) -> &GenreMatcher {
    &self.preferred
  }

  pub fn avoided(&self) -> &GenreMatcher {
    &self.avoided
  }

  pub fn observe(&self, genres: &GenreSet) -> Observation {
    if self.preferred.matches(genres) {
      Observation::Preferred
    } else if self.avoided.matches(genres) {
      Observation::Avoided
    } else {
      Observation::None
    }
  }
}

impl Default for TasteProfile {
  fn default() -> Self {
    let parse = |raw: &[&str]| raw.iter().filter_map(|t| GenreTerm::normalize(t)).collect::<Vec<_>>();
    Self {
      preferred: GenreMatcher::new(parse(DEFAULT_PREFERRED_TERMS)),
      avoided: GenreMatcher::new(parse(DEFAULT_AVOIDED_TERMS)),
    }
  }
}
