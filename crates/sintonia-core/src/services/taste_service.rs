use futures::StreamExt;
use tracing::{debug, info};

use crate::errors::CoreError;
use crate::ports::{CatalogLookup, SourceFeed, TasteStore};
use crate::taste::{
  ObservationBatch, PresenterClassifier, PresenterFilter, PresenterGate, TasteBook, TasteProfile, TasteReport,
};

/// Summary of one learning run.
#[derive(Debug, Clone)]
pub struct LearnOutcome {
  /// The book as persisted at the end of the run.
  pub book: TasteBook,
  /// Songs merged in this run.
  pub observed: usize,
  /// Songs without a presenter, which cannot be attributed.
  pub unattributed: usize,
}

/// Learns presenter taste from feeds and answers questions about it.
///
/// The store is injected; nothing here keeps global state.
pub struct TasteService<C, S>
where
  C: CatalogLookup,
  S: TasteStore,
{
  catalog: C,
  store: S,
  profile: TasteProfile,
  classifier: PresenterClassifier,
}

impl<C, S> TasteService<C, S>
where
  C: CatalogLookup,
  S: TasteStore,
{
  pub fn new(catalog: C, store: S, profile: TasteProfile, classifier: PresenterClassifier) -> Self {
    Self { catalog, store, profile, classifier }
  }

  pub fn classifier(&self) -> &PresenterClassifier {
    &self.classifier
  }

  /// Looks up the genres of every attributed song and classifies it.
  ///
  /// Touches neither the book nor the store.
  pub async fn observe<F>(&self, feed: &F) -> Result<(ObservationBatch, usize), CoreError>
  where
    F: SourceFeed + ?Sized,
  {
    let mut records = feed.records();
    let mut batch = ObservationBatch::new();
    let mut unattributed = 0;

    while let Some(record) = records.next().await {
      let song = record?;
      let Some(presenter) = song.presenter.clone() else {
        unattributed += 1;
        continue;
      };

      let genres = self.catalog.genres_of(&song.artist).await?;
      let observation = self.profile.observe(&genres);
      debug!(presenter = %presenter, song = %song, genres = %genres, outcome = %observation, "song observed");
      batch.push(presenter, observation);
    }

    Ok((batch, unattributed))
  }

  /// Load, observe, merge, save.
  ///
  /// The store is written exactly once, after every observation is in hand, so
  /// a failure or interruption midway leaves the previous state on disk.
  pub async fn learn<F>(&self, feed: &F) -> Result<LearnOutcome, CoreError>
  where
    F: SourceFeed + ?Sized,
  {
    let mut book = self.store.load()?;
    let known_before = book.len();

    let (batch, unattributed) = self.observe(feed).await?;
    book.merge_batch(&batch);
    self.store.save(&book)?;

    info!(
      observed = batch.len(),
      unattributed,
      presenters = book.len(),
      new_presenters = book.len() - known_before,
      "taste store updated"
    );
    Ok(LearnOutcome { book, observed: batch.len(), unattributed })
  }

  pub fn report(&self) -> Result<TasteReport, CoreError> {
    let book = self.store.load()?;
    Ok(TasteReport::build(&book, &self.classifier))
  }

  pub fn gate(&self, filter: PresenterFilter) -> Result<PresenterGate, CoreError> {
    let book = self.store.load()?;
    Ok(PresenterGate::new(&book, &self.classifier, filter))
  }
}

#[cfg(test)]
mod tests {
  use std::num::NonZeroUsize;

  use super::*;
  use crate::domain::PresenterStats;
  use crate::ports::InMemoryTasteStore;
  use crate::services::fakes::{FakeCatalog, VecFeed, dj, song};
  use crate::taste::Tier;

  fn service(catalog: FakeCatalog, store: InMemoryTasteStore) -> TasteService<FakeCatalog, InMemoryTasteStore> {
    TasteService::new(catalog, store, TasteProfile::default(), PresenterClassifier::default())
  }

  #[tokio::test]
  async fn learning_from_an_empty_store() {
    let catalog = FakeCatalog::default().with("X", "Song1", &["rock"]).with("Y", "Song2", &["rap"]);
    let service = service(catalog, InMemoryTasteStore::new());
    let feed = VecFeed(vec![song("X", "Song1", Some("DJ1")), song("Y", "Song2", Some("DJ1"))]);

    let outcome = service.learn(&feed).await.unwrap();

    let stats = outcome.book.get(&dj("DJ1")).copied().unwrap();
    assert_eq!((stats.songs_observed(), stats.preferred_hits(), stats.avoided_hits()), (2, 1, 1));
    assert_eq!(stats.score(), 0.0);
    assert_eq!(service.classifier().tier(&stats), Tier::Neutral);
    assert_eq!(service.store.load().unwrap(), outcome.book);
  }

  #[tokio::test]
  async fn runs_accumulate_in_the_store() {
    let catalog = || FakeCatalog::default().with("X", "S1", &["rock"]).with("Y", "S2", &["rap"]).with("Z", "S3", &[]);
    let s1 = song("X", "S1", Some("DJ1"));
    let s2 = song("Y", "S2", Some("DJ2"));
    let s3 = song("Z", "S3", Some("DJ1"));

    let split = service(catalog(), InMemoryTasteStore::new());
    split.learn(&VecFeed(vec![s1.clone(), s2.clone()])).await.unwrap();
    split.learn(&VecFeed(vec![s3.clone()])).await.unwrap();

    let single = service(catalog(), InMemoryTasteStore::new());
    single.learn(&VecFeed(vec![s1, s2, s3])).await.unwrap();

    let book = split.store.load().unwrap();
    assert_eq!(book, single.store.load().unwrap());
    assert_eq!(book.get(&dj("DJ1")), Some(&PresenterStats::new(2, 1, 0).unwrap()));
    assert_eq!(book.get(&dj("DJ2")), Some(&PresenterStats::new(1, 0, 1).unwrap()));
  }

  #[tokio::test]
  async fn failed_run_leaves_store_untouched() {
    let mut before = TasteBook::new();
    before.insert(dj("DJ1"), PresenterStats::new(3, 1, 1).unwrap());
    let service = service(FakeCatalog::offline(), InMemoryTasteStore::with_book(before.clone()));

    let err = service.learn(&VecFeed(vec![song("X", "S1", Some("DJ1"))])).await.unwrap_err();

    assert!(matches!(err, CoreError::Catalog(_)));
    assert_eq!(service.store.load().unwrap(), before);
  }

  #[tokio::test]
  async fn unattributed_songs_are_not_observed() {
    let service = service(FakeCatalog::default().with("X", "S1", &["rock"]), InMemoryTasteStore::new());

    let outcome = service.learn(&VecFeed(vec![song("X", "S1", None), song("X", "S1", Some("dj"))])).await.unwrap();

    assert_eq!(outcome.observed, 1);
    assert_eq!(outcome.unattributed, 1);
    assert_eq!(outcome.book.len(), 1);
  }

  #[tokio::test]
  async fn gate_and_report_read_the_store() {
    let mut book = TasteBook::new();
    book.insert(dj("a"), PresenterStats::new(2, 1, 0).unwrap());
    book.insert(dj("b"), PresenterStats::new(2, 1, 0).unwrap());
    let service = service(FakeCatalog::default(), InMemoryTasteStore::with_book(book));

    let gate = service.gate(PresenterFilter::TopN(NonZeroUsize::new(1).unwrap())).unwrap();
    assert!(gate.admits(&dj("a")));
    assert!(!gate.admits(&dj("b")));

    let report = service.report().unwrap();
    let names: Vec<&str> = report.rows().iter().map(|r| r.presenter.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
  }
}
