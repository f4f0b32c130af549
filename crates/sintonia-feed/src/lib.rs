mod adapter;
mod config;
mod parser;

pub use adapter::FileFeed;
pub use config::FeedConfig;
pub use parser::{LineParser, Step, parse_song_line, title_case};
