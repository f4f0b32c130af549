pub mod playlist_service;
pub mod taste_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use playlist_service::{Assembly, PlaylistService, SelectionRules, SkipReason, SkippedSong};
pub use taste_service::{LearnOutcome, TasteService};
