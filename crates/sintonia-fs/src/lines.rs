use std::io;
use std::path::PathBuf;

use futures::stream::{self, Stream};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

enum State {
  Pending(PathBuf),
  Open(Lines<BufReader<File>>),
  Done,
}

/// Stream of the lines of a text file, opened lazily on first poll.
///
/// An open error is yielded once and ends the stream. Each call starts again
/// from the top of the file.
pub fn read_lines(path: impl Into<PathBuf>) -> impl Stream<Item = io::Result<String>> {
  stream::unfold(State::Pending(path.into()), |state| async move {
    let mut lines = match state {
      State::Done => return None,
      State::Open(lines) => lines,
      State::Pending(path) => match File::open(&path).await {
        Ok(file) => BufReader::new(file).lines(),
        Err(e) => return Some((Err(e), State::Done)),
      },
    };

    match lines.next_line().await {
      Ok(Some(line)) => Some((Ok(line), State::Open(lines))),
      Ok(None) => None,
      Err(e) => Some((Err(e), State::Done)),
    }
  })
}
