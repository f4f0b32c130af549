use std::fmt;

use crate::domain::PresenterId;
use crate::taste::book::TasteBook;
use crate::taste::classifier::{PresenterClassifier, Tier};

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
  pub presenter: PresenterId,
  pub tier: Tier,
  pub score: f64,
  pub songs_observed: u64,
  pub preferred_hits: u64,
  pub avoided_hits: u64,
}

impl fmt::Display for ReportRow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{:<9} {:+.3}  observed={} preferred={} avoided={}  {}",
      self.tier.label(),
      self.score,
      self.songs_observed,
      self.preferred_hits,
      self.avoided_hits,
      self.presenter
    )
  }
}

/// Classification of every known presenter, best score first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasteReport {
  rows: Vec<ReportRow>,
}

impl TasteReport {
  pub fn build(book: &TasteBook, classifier: &PresenterClassifier) -> Self {
    let mut rows: Vec<ReportRow> = book
      .iter()
      .map(|(presenter, stats)| ReportRow {
        presenter: presenter.clone(),
        tier: classifier.tier(stats),
        score: stats.score(),
        songs_observed: stats.songs_observed(),
        preferred_hits: stats.preferred_hits(),
        avoided_hits: stats.avoided_hits(),
      })
      .collect();

    rows.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.presenter.cmp(&b.presenter)));
    Self { rows }
  }

  pub fn rows(&self) -> &[ReportRow] {
    &self.rows
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

impl fmt::Display for TasteReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in &self.rows {
      writeln!(f, "{row}")?;
    }
    Ok(())
  }
}
