pub mod genre;
pub mod ids;
pub mod presenter;
pub mod song;

pub use genre::{GenreSet, GenreTerm};
pub use ids::{CollectionId, TrackId};
pub use presenter::{PresenterId, PresenterStats};
pub use song::{ResolvedTrack, SongRecord};
