use crate::domain::{GenreSet, GenreTerm};

/// A genre from the artist's set together with the configured term found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreMatch<'a> {
  pub genre: &'a GenreTerm,
  pub term: &'a GenreTerm,
}

/// Partial-substring membership test against a fixed term list.
///
/// A term matches a genre when it occurs anywhere inside it, so `"rap"` catches
/// `"rap"`, `"trap"` and `"german rap"`. An empty genre set never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreMatcher {
  terms: Vec<GenreTerm>,
}

impl GenreMatcher {
  pub fn new<I>(terms: I) -> Self
  where
    I: IntoIterator<Item = GenreTerm>,
  {
    let mut unique = Vec::new();
    for term in terms {
      if !unique.contains(&term) {
        unique.push(term);
      }
    }
    Self { terms: unique }
  }

  pub fn terms(&self) -> &[GenreTerm] {
    &self.terms
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }

  pub fn matches(&self, genres: &GenreSet) -> bool {
    self.first_match(genres).is_some()
  }

  /// First hit scanning genres in catalog order, then terms in configured order.
  pub fn first_match<'a>(&'a self, genres: &'a GenreSet) -> Option<GenreMatch<'a>> {
    genres
      .iter()
      .find_map(|genre| self.terms.iter().find(|term| term.is_part_of(genre)).map(|term| GenreMatch { genre, term }))
  }
}
