mod io;
mod lines;

pub use io::{atomic_write_str, read_optional};
pub use lines::read_lines;
