use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::domain::{PresenterId, PresenterStats};
use crate::errors::TasteError;
use crate::taste::book::TasteBook;

/// Preference tier of a presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  Preferred,
  Neutral,
  Avoided,
}

impl Tier {
  pub fn label(&self) -> &'static str {
    match self {
      Tier::Preferred => "preferred",
      Tier::Neutral => "neutral",
      Tier::Avoided => "avoided",
    }
  }
}

impl fmt::Display for Tier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Score bounds separating the tiers. Both comparisons are strict, so a score
/// sitting exactly on a bound is neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
  preferred_above: f64,
  avoided_below: f64,
}

impl TierThresholds {
  pub const DEFAULT_PREFERRED_ABOVE: f64 = 0.1;
  pub const DEFAULT_AVOIDED_BELOW: f64 = -0.1;

  pub fn new(preferred_above: f64, avoided_below: f64) -> Result<Self, TasteError> {
    if !preferred_above.is_finite() || !avoided_below.is_finite() || avoided_below > preferred_above {
      return Err(TasteError::InvalidThresholds { preferred_above, avoided_below });
    }
    Ok(Self { preferred_above, avoided_below })
  }

  pub fn preferred_above(&self) -> f64 {
    self.preferred_above
  }

  pub fn avoided_below(&self) -> f64 {
    self.avoided_below
  }
}

impl Default for TierThresholds {
  fn default() -> Self {
    Self { preferred_above: Self::DEFAULT_PREFERRED_ABOVE, avoided_below: Self::DEFAULT_AVOIDED_BELOW }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresenterClassifier {
  thresholds: TierThresholds,
}

impl PresenterClassifier {
  pub fn new(thresholds: TierThresholds) -> Self {
    Self { thresholds }
  }

  pub fn thresholds(&self) -> TierThresholds {
    self.thresholds
  }

  pub fn tier_for_score(&self, score: f64) -> Tier {
    if score > self.thresholds.preferred_above {
      Tier::Preferred
    } else if score < self.thresholds.avoided_below {
      Tier::Avoided
    } else {
      Tier::Neutral
    }
  }

  pub fn tier(&self, stats: &PresenterStats) -> Tier {
    self.tier_for_score(stats.score())
  }
}

/// How presenters are filtered when assembling a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterFilter {
  /// Keep preferred presenters, plus neutral ones when `include_neutral`.
  Tiers { include_neutral: bool },
  /// Keep the `n` best-scoring presenters of the book.
  TopN(NonZeroUsize),
}

impl Default for PresenterFilter {
  fn default() -> Self {
    PresenterFilter::Tiers { include_neutral: false }
  }
}

/// Pass/fail decisions for presenters, precomputed against one [`TasteBook`].
///
/// Presenters missing from the book are neutral with a score of `0.0`.
#[derive(Debug, Clone)]
pub struct PresenterGate {
  tiers: HashMap<PresenterId, Tier>,
  mode: GateMode,
}

#[derive(Debug, Clone)]
enum GateMode {
  Tiers { include_neutral: bool },
  TopN { selected: HashSet<PresenterId>, admits_unknown: bool },
}

impl PresenterGate {
  pub fn new(book: &TasteBook, classifier: &PresenterClassifier, filter: PresenterFilter) -> Self {
    let tiers = book.iter().map(|(id, stats)| (id.clone(), classifier.tier(stats))).collect();

    let mode = match filter {
      PresenterFilter::Tiers { include_neutral } => GateMode::Tiers { include_neutral },
      PresenterFilter::TopN(n) => {
        let selected = rank_by_score(book).into_iter().take(n.get()).map(|(id, _)| id.clone()).collect();
        // An unknown presenter ranks as if appended to the book with 0.0.
        let ahead_of_unknown = book.iter().filter(|(_, stats)| stats.score() >= 0.0).count();
        GateMode::TopN { selected, admits_unknown: ahead_of_unknown < n.get() }
      }
    };

    Self { tiers, mode }
  }

  pub fn tier(&self, presenter: &PresenterId) -> Tier {
    self.tiers.get(presenter).copied().unwrap_or(Tier::Neutral)
  }

  pub fn admits(&self, presenter: &PresenterId) -> bool {
    match &self.mode {
      GateMode::Tiers { include_neutral } => match self.tier(presenter) {
        Tier::Preferred => true,
        Tier::Neutral => *include_neutral,
        Tier::Avoided => false,
      },
      GateMode::TopN { selected, admits_unknown } => {
        if self.tiers.contains_key(presenter) {
          selected.contains(presenter)
        } else {
          *admits_unknown
        }
      }
    }
  }
}

/// Presenters by descending score; equal scores keep book order.
pub fn rank_by_score(book: &TasteBook) -> Vec<(&PresenterId, &PresenterStats)> {
  let mut ranked: Vec<_> = book.iter().collect();
  // Stable sort: ties keep book order.
  ranked.sort_by(|(_, a), (_, b)| b.score().total_cmp(&a.score()));
  ranked
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dj(name: &str) -> PresenterId {
    name.parse().unwrap()
  }

  fn book(rows: &[(&str, u64, u64, u64)]) -> TasteBook {
    let mut book = TasteBook::new();
    for &(name, songs, preferred, avoided) in rows {
      book.insert(dj(name), PresenterStats::new(songs, preferred, avoided).unwrap());
    }
    book
  }

  fn top(n: usize) -> PresenterFilter {
    PresenterFilter::TopN(NonZeroUsize::new(n).unwrap())
  }

  #[test]
  fn score_of_point_two_is_preferred() {
    let stats = PresenterStats::new(10, 3, 1).unwrap();
    assert_eq!(PresenterClassifier::default().tier(&stats), Tier::Preferred);
  }

  #[test]
  fn bounds_are_strict() {
    let classifier = PresenterClassifier::default();
    assert_eq!(classifier.tier(&PresenterStats::new(10, 1, 0).unwrap()), Tier::Neutral);
    assert_eq!(classifier.tier(&PresenterStats::new(10, 0, 1).unwrap()), Tier::Neutral);
    assert_eq!(classifier.tier(&PresenterStats::new(10, 0, 2).unwrap()), Tier::Avoided);
    assert_eq!(classifier.tier(&PresenterStats::default()), Tier::Neutral);
  }

  #[test]
  fn inverted_thresholds_are_rejected() {
    assert!(TierThresholds::new(-0.2, 0.2).is_err());
    assert!(TierThresholds::new(f64::NAN, 0.0).is_err());
    assert!(TierThresholds::new(0.0, 0.0).is_ok());
  }

  #[test]
  fn custom_thresholds_move_the_tiers() {
    let classifier = PresenterClassifier::new(TierThresholds::new(0.5, -0.5).unwrap());
    assert_eq!(classifier.tier(&PresenterStats::new(10, 3, 1).unwrap()), Tier::Neutral);
    assert_eq!(classifier.tier(&PresenterStats::new(10, 6, 0).unwrap()), Tier::Preferred);
  }

  #[test]
  fn tier_mode_filters() {
    let book = book(&[("good", 10, 5, 0), ("meh", 10, 1, 1), ("bad", 10, 0, 5)]);
    let classifier = PresenterClassifier::default();

    let strict = PresenterGate::new(&book, &classifier, PresenterFilter::Tiers { include_neutral: false });
    assert!(strict.admits(&dj("good")));
    assert!(!strict.admits(&dj("meh")));
    assert!(!strict.admits(&dj("bad")));
    assert!(!strict.admits(&dj("stranger")));

    let lenient = PresenterGate::new(&book, &classifier, PresenterFilter::Tiers { include_neutral: true });
    assert!(lenient.admits(&dj("meh")));
    assert!(lenient.admits(&dj("stranger")));
    assert!(!lenient.admits(&dj("bad")));
  }

  #[test]
  fn top_n_ties_follow_book_order() {
    let classifier = PresenterClassifier::default();
    let ab = book(&[("a", 2, 1, 0), ("b", 2, 1, 0), ("c", 10, 3, 0)]);
    let ba = book(&[("b", 2, 1, 0), ("a", 2, 1, 0), ("c", 10, 3, 0)]);

    for _ in 0..3 {
      let gate = PresenterGate::new(&ab, &classifier, top(1));
      assert!(gate.admits(&dj("a")));
      assert!(!gate.admits(&dj("b")));
      assert!(!gate.admits(&dj("c")));
    }

    let gate = PresenterGate::new(&ba, &classifier, top(1));
    assert!(gate.admits(&dj("b")));
    assert!(!gate.admits(&dj("a")));
  }

  #[test]
  fn top_n_ignores_tiers() {
    let gate = PresenterGate::new(&book(&[("bad", 10, 0, 5)]), &PresenterClassifier::default(), top(1));
    assert!(gate.admits(&dj("bad")));
  }

  #[test]
  fn unknown_presenter_ranks_after_non_negative_scores() {
    let classifier = PresenterClassifier::default();
    let book = book(&[("a", 2, 1, 0), ("b", 2, 0, 2)]);

    assert!(!PresenterGate::new(&book, &classifier, top(1)).admits(&dj("new")));
    let gate = PresenterGate::new(&book, &classifier, top(2));
    assert!(gate.admits(&dj("new")));
    assert!(gate.admits(&dj("b")));
  }

  #[test]
  fn ranking_is_stable() {
    let book = book(&[("x", 4, 1, 1), ("y", 4, 2, 0), ("z", 4, 1, 1)]);
    let order: Vec<&str> = rank_by_score(&book).into_iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, vec!["y", "x", "z"]);
  }
}
