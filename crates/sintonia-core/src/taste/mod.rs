//! Genre matching and presenter taste learning.
//!
//! Everything in here is pure and synchronous; persistence and catalog access
//! live behind the traits in [`crate::ports`].

pub mod book;
pub mod classifier;
pub mod matcher;
pub mod profile;
pub mod report;

pub use book::{ObservationBatch, TasteBook};
pub use classifier::{PresenterClassifier, PresenterFilter, PresenterGate, Tier, TierThresholds, rank_by_score};
pub use matcher::{GenreMatch, GenreMatcher};
pub use profile::{DEFAULT_AVOIDED_TERMS, DEFAULT_PREFERRED_TERMS, Observation, TasteProfile};
pub use report::{ReportRow, TasteReport};
