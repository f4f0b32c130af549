mod config;
mod local_catalog;
mod playlist_file;

pub use config::CatalogConfig;
pub use local_catalog::LocalCatalog;
pub use playlist_file::{PlaylistFileWriter, slugify};
