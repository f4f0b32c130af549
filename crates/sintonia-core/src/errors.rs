use thiserror::Error;

use crate::ports::{CatalogError, FeedError, StoreError, WriterError};

/// Contract violations raised by the pure taste engine.
///
/// Matching, accumulation and classification never perform I/O, so these are
/// the only failures they can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TasteError {
  #[error("genre term must not be empty")]
  EmptyTerm,

  #[error("presenter name must not be empty")]
  EmptyPresenter,

  #[error("term '{0}' is configured as both preferred and avoided")]
  OverlappingTerm(String),

  #[error("invalid tier thresholds: preferred above {preferred_above}, avoided below {avoided_below}")]
  InvalidThresholds { preferred_above: f64, avoided_below: f64 },

  #[error("invalid presenter stats: {preferred_hits} preferred + {avoided_hits} avoided > {songs_observed} observed")]
  InvalidStats { songs_observed: u64, preferred_hits: u64, avoided_hits: u64 },
}

/// Error of the orchestration services.
///
/// Every external collaborator keeps its own variant so the caller can tell a
/// catalog outage from a broken store.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("catalog error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("feed error: {0}")]
  Feed(#[from] FeedError),

  #[error("collection writer error: {0}")]
  Writer(#[from] WriterError),

  #[error("taste store error: {0}")]
  Store(#[from] StoreError),

  #[error(transparent)]
  Taste(#[from] TasteError),

  #[error("no tracks survived selection")]
  NoTracks,
}
