//! Line-level parsing of song lists.
//!
//! A song list is plain text, one `Artist - Title` per line. Scraped lists are
//! noisy, so anything that does not look like a song is dropped instead of
//! failing the whole file:
//!
//! ```text
//! # comentario
//! [Morning Show]
//! Daft Punk - Get Lucky
//! 06:00
//! Wolf Alice - Don't Delete The Kisses (NOVINKA)
//! []
//! Radiohead - Reckoner
//! ```

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use sintonia_core::domain::{PresenterId, SongRecord};
use tracing::debug;

use crate::config::FeedConfig;

const MIN_LINE_CHARS: usize = 5;
const MIN_PART_CHARS: usize = 2;
const MAX_ARTIST_CHARS: usize = 100;
const MAX_TITLE_CHARS: usize = 150;

static SKIP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
  [
    r"^\d{1,2}[:.]\d{2}", // 06:00, 6.00
    r"^https?://",
    r"^\d+\s*$",
    r"[{}]",
  ]
  .iter()
  .map(|p| Regex::new(p).expect("static pattern"))
  .collect()
});

static PUNCTUATION_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\W\s]+$").expect("static pattern"));

/// Splits a raw line into `(artist, title)` if it looks like a song.
pub fn parse_song_line(line: &str) -> Option<(String, String)> {
  parse_with_suffixes(line, &[])
}

fn parse_with_suffixes(line: &str, suffixes: &[String]) -> Option<(String, String)> {
  let line = line.trim();
  if line.chars().count() < MIN_LINE_CHARS || SKIP_PATTERNS.iter().any(|re| re.is_match(line)) {
    return None;
  }

  let (artist, title) = line.split_once(" - ")?;
  let artist = artist.trim();
  let title = strip_suffixes(title.trim(), suffixes);

  let valid = |part: &str, max: usize| {
    let chars = part.chars().count();
    (MIN_PART_CHARS..=max).contains(&chars) && !PUNCTUATION_ONLY.is_match(part)
  };
  if !valid(artist, MAX_ARTIST_CHARS) || !valid(title, MAX_TITLE_CHARS) {
    return None;
  }

  Some((artist.to_string(), title.to_string()))
}

fn strip_suffixes<'a>(mut title: &'a str, suffixes: &[String]) -> &'a str {
  for suffix in suffixes {
    let wanted = suffix.trim().to_lowercase();
    let n = wanted.chars().count();
    if n == 0 {
      continue;
    }
    let Some((start, _)) = title.char_indices().rev().nth(n - 1) else {
      continue;
    };
    if title[start..].to_lowercase() == wanted {
      title = title[..start].trim_end();
    }
  }
  title
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts after anything that is neither alphanumeric nor an apostrophe.
pub fn title_case(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut word_start = true;
  for c in text.chars() {
    if c.is_alphanumeric() {
      if word_start {
        out.extend(c.to_uppercase());
      } else {
        out.extend(c.to_lowercase());
      }
      word_start = false;
    } else {
      out.push(c);
      word_start = c != '\'' && c != '’';
    }
  }
  out
}

/// What a single line contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  Song(SongRecord),
  Skip,
  /// The configured limit is reached; nothing else will be emitted.
  Done,
}

/// Stateful line-by-line parser: presenter headers, dedup and limit.
#[derive(Debug)]
pub struct LineParser<'a> {
  config: &'a FeedConfig,
  presenter: Option<PresenterId>,
  seen: HashSet<(String, String)>,
  emitted: usize,
}

impl<'a> LineParser<'a> {
  pub fn new(config: &'a FeedConfig) -> Self {
    Self { config, presenter: None, seen: HashSet::new(), emitted: 0 }
  }

  pub fn is_done(&self) -> bool {
    self.config.limit > 0 && self.emitted >= self.config.limit
  }

  pub fn push(&mut self, raw: &str) -> Step {
    if self.is_done() {
      return Step::Done;
    }

    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
      return Step::Skip;
    }

    if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
      // `[]` clears, anything else that normalises to a name sets it.
      self.presenter = header.parse().ok();
      debug!(presenter = ?self.presenter.as_ref().map(|p| p.as_str()), "presenter header");
      return Step::Skip;
    }

    let Some((mut artist, mut title)) = parse_with_suffixes(line, &self.config.title_suffixes) else {
      debug!(line, "line ignored");
      return Step::Skip;
    };

    if self.config.title_case {
      artist = title_case(&artist);
      title = title_case(&title);
    }

    if self.config.dedup && !self.seen.insert((artist.to_lowercase(), title.to_lowercase())) {
      debug!(artist, title, "duplicate song dropped");
      return Step::Skip;
    }

    self.emitted += 1;
    let record = SongRecord::new(artist, title);
    Step::Song(match &self.presenter {
      Some(presenter) => record.with_presenter(presenter.clone()),
      None => record,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn songs(config: &FeedConfig, text: &str) -> Vec<SongRecord> {
    let mut parser = LineParser::new(config);
    let mut out = Vec::new();
    for line in text.lines() {
      match parser.push(line) {
        Step::Song(record) => out.push(record),
        Step::Skip => {}
        Step::Done => break,
      }
    }
    out
  }

  #[test]
  fn accepts_artist_dash_title() {
    assert_eq!(parse_song_line("  Daft Punk - Get Lucky "), Some(("Daft Punk".into(), "Get Lucky".into())));
    assert_eq!(parse_song_line("A-ha - Take On Me - Live"), Some(("A-ha".into(), "Take On Me - Live".into())));
  }

  #[test]
  fn rejects_noise() {
    for line in [
      "",
      "a - b",
      "06:00 Morning",
      "6.00 - News",
      "https://radio.example/program",
      "12345",
      ".btn { color: red } - x",
      "No separator here",
      "Artist-Title",
      "!! - ??",
      "X - Proper Title",
    ] {
      assert_eq!(parse_song_line(line), None, "{line:?}");
    }

    let long_artist = format!("{} - Title", "a".repeat(101));
    assert_eq!(parse_song_line(&long_artist), None);
    let long_title = format!("Artist - {}", "t".repeat(151));
    assert_eq!(parse_song_line(&long_title), None);
  }

  #[test]
  fn strips_configured_suffixes() {
    let config = FeedConfig::default();
    let got = songs(&config, "Wolf Alice - Smile (NOVINKA)\nKarel Gott - Být Stále Mlád (novinka)  ");
    let titles: Vec<&str> = got.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Smile", "Být Stále Mlád"]);
  }

  #[test]
  fn presenter_headers_attribute_following_songs() {
    let config = FeedConfig::default();
    let got = songs(&config, "# comment\n[Morning  Show]\nA1 - T1\n[]\nA2 - T2\n[Night]\nA3 - T3\n");

    let presenters: Vec<Option<&str>> = got.iter().map(|s| s.presenter.as_ref().map(|p| p.as_str())).collect();
    assert_eq!(presenters, vec![Some("morning show"), None, Some("night")]);
  }

  #[test]
  fn dedup_is_case_insensitive_and_keeps_first() {
    let config = FeedConfig::default();
    let got = songs(&config, "Muse - Uprising\nMUSE - uprising\nBlur - Song 2\n");
    assert_eq!(got.iter().map(ToString::to_string).collect::<Vec<_>>(), vec!["Muse - Uprising", "Blur - Song 2"]);

    let keep = FeedConfig { dedup: false, ..FeedConfig::default() };
    assert_eq!(songs(&keep, "Muse - Uprising\nMUSE - uprising\n").len(), 2);
  }

  #[test]
  fn limit_counts_after_dedup() {
    let config = FeedConfig { limit: 2, ..FeedConfig::default() };
    let got = songs(&config, "Muse - Uprising\nMuse - Uprising\nBlur - Song 2\nPulp - Disco 2000\n");
    assert_eq!(got.len(), 2);
    assert_eq!(got[1].artist, "Blur");
  }

  #[test]
  fn title_case_words() {
    assert_eq!(title_case("the BLACK keys"), "The Black Keys");
    assert_eq!(title_case("don't stop (live)"), "Don't Stop (Live)");
    assert_eq!(title_case("ac/dc"), "Ac/Dc");

    let config = FeedConfig { title_case: true, ..FeedConfig::default() };
    assert_eq!(songs(&config, "the cure - boys don't cry")[0].to_string(), "The Cure - Boys Don't Cry");
  }
}
