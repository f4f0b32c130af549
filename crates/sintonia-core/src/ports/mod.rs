pub mod catalog;
pub mod feed;
pub mod progress;
pub mod taste_store;
pub mod writer;

pub use catalog::{CatalogError, CatalogLookup};
pub use feed::{FeedError, SourceFeed};
pub use progress::{NoopReporter, ProgressReporter};
pub use taste_store::{InMemoryTasteStore, StoreError, TasteStore};
pub use writer::{CollectionHandle, CollectionSpec, CollectionWriter, MAX_BATCH, WriterError};
