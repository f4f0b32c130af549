use std::collections::HashMap;

use crate::domain::{PresenterId, PresenterStats};
use crate::taste::profile::Observation;

/// Accumulated statistics of every presenter seen so far.
///
/// Insertion order is kept: it is the tie-breaker when ranking presenters and
/// the order in which the store is written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasteBook {
  entries: Vec<(PresenterId, PresenterStats)>,
  index: HashMap<PresenterId, usize>,
}

impl TasteBook {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, presenter: &PresenterId) -> Option<&PresenterStats> {
    self.index.get(presenter).map(|&i| &self.entries[i].1)
  }

  pub fn contains(&self, presenter: &PresenterId) -> bool {
    self.index.contains_key(presenter)
  }

  /// Presenters with their statistics, in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&PresenterId, &PresenterStats)> {
    self.entries.iter().map(|(id, stats)| (id, stats))
  }

  fn slot(&mut self, presenter: &PresenterId) -> &mut PresenterStats {
    let i = match self.index.get(presenter) {
      Some(&i) => i,
      None => {
        self.entries.push((presenter.clone(), PresenterStats::default()));
        self.index.insert(presenter.clone(), self.entries.len() - 1);
        self.entries.len() - 1
      }
    };
    &mut self.entries[i].1
  }

  /// Folds one observed song into the presenter's counters.
  ///
  /// Purely additive: a presenter is created on first sight and never reset.
  pub fn record(&mut self, presenter: &PresenterId, observation: Observation) -> PresenterStats {
    let stats = self.slot(presenter);
    stats.bump(observation == Observation::Preferred, observation == Observation::Avoided);
    *stats
  }

  /// Adds previously accumulated counters (e.g. rows read from disk).
  pub fn insert(&mut self, presenter: PresenterId, stats: PresenterStats) {
    self.slot(&presenter).absorb(&stats);
  }

  pub fn merge_batch(&mut self, batch: &ObservationBatch) {
    for (presenter, observation) in batch.iter() {
      self.record(presenter, *observation);
    }
  }

  /// Adds every presenter of `other`, keeping `self`'s order for known ones.
  pub fn absorb(&mut self, other: &TasteBook) {
    for (presenter, stats) in other.iter() {
      self.slot(presenter).absorb(stats);
    }
  }
}

/// Observations gathered during one run, applied to the book in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationBatch {
  observations: Vec<(PresenterId, Observation)>,
}

impl ObservationBatch {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, presenter: PresenterId, observation: Observation) {
    self.observations.push((presenter, observation));
  }

  pub fn len(&self) -> usize {
    self.observations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.observations.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &(PresenterId, Observation)> {
    self.observations.iter()
  }
}

impl FromIterator<(PresenterId, Observation)> for ObservationBatch {
  fn from_iter<T: IntoIterator<Item = (PresenterId, Observation)>>(iter: T) -> Self {
    Self { observations: iter.into_iter().collect() }
  }
}
