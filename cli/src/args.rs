use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "sintonia", version, about = "Genre-filtered playlists from radio song lists")]
pub struct Cli {
  /// Taste store file (overrides [storage] store_path).
  #[arg(long, global = true, env = "SINTONIA_STORE")]
  pub store: Option<PathBuf>,

  /// Offline catalog file (overrides [catalog] catalog_path).
  #[arg(long, global = true, env = "SINTONIA_CATALOG")]
  pub catalog: Option<PathBuf>,

  /// Directory where playlist files are written (overrides [catalog] output_dir).
  #[arg(long, global = true)]
  pub output_dir: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Resolve a song list and publish it as a playlist.
  Build(BuildArgs),
  /// Learn presenter taste from a song list with presenter headers.
  Analyze(AnalyzeArgs),
  /// Print the classification of every known presenter.
  Report,
  /// Print where configuration and data live.
  Where,
}

#[derive(Debug, Args)]
pub struct FeedArgs {
  /// Keep at most this many songs (0 = all).
  #[arg(long)]
  pub limit: Option<usize>,

  /// Keep repeated artist/title pairs.
  #[arg(long)]
  pub keep_duplicates: bool,

  /// Normalise artist and title to Title Case.
  #[arg(long)]
  pub title_case: bool,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Text file with one `Artist - Title` per line.
  pub songs_file: PathBuf,

  /// Name of the new playlist.
  pub name: String,

  #[arg(short, long, default_value = "")]
  pub description: String,

  #[arg(long)]
  pub private: bool,

  /// Comma-separated genre terms to exclude, e.g. "rap,hip hop".
  #[arg(short = 'x', long = "exclude-genres")]
  pub exclude_genres: Option<String>,

  /// Only keep songs from preferred presenters.
  #[arg(long)]
  pub filter_presenters: bool,

  /// Also keep songs from neutral presenters.
  #[arg(long, conflicts_with = "top_n")]
  pub include_neutral: bool,

  /// Keep only songs from the N best-scoring presenters.
  #[arg(long)]
  pub top_n: Option<NonZeroUsize>,

  #[command(flatten)]
  pub feed: FeedArgs,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
  pub songs_file: PathBuf,

  #[command(flatten)]
  pub feed: FeedArgs,
}

/// Splits a comma-separated list, trimming and lowercasing, dropping empties.
pub fn split_terms(raw: &str) -> Vec<String> {
  raw.split(',').map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn parses_build_flags() {
    let cli = Cli::try_parse_from([
      "sintonia",
      "build",
      "songs.txt",
      "Rock Playlist",
      "-d",
      "Loud",
      "--private",
      "-x",
      "rap, Hip Hop,,",
      "--top-n",
      "3",
      "--limit",
      "20",
      "--store",
      "/tmp/taste.toml",
    ])
    .unwrap();

    assert_eq!(cli.store, Some(PathBuf::from("/tmp/taste.toml")));
    let Command::Build(args) = cli.command else { panic!("expected build") };
    assert_eq!(args.name, "Rock Playlist");
    assert!(args.private);
    assert_eq!(args.top_n, NonZeroUsize::new(3));
    assert_eq!(args.feed.limit, Some(20));
    assert_eq!(split_terms(args.exclude_genres.as_deref().unwrap()), vec!["rap", "hip hop"]);
  }

  #[test]
  fn neutral_and_top_n_conflict() {
    let err = Cli::try_parse_from(["sintonia", "build", "s.txt", "n", "--include-neutral", "--top-n", "2"]);
    assert!(err.is_err());
  }

  #[test]
  fn top_n_must_be_positive() {
    assert!(Cli::try_parse_from(["sintonia", "build", "s.txt", "n", "--top-n", "0"]).is_err());
  }
}
