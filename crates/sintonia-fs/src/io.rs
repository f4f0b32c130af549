use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use tracing::debug;

/// Escribe `contents` en `path` de forma atómica.
///
/// Se escribe a un `.tmp` hermano, se hace `sync_all` y se renombra encima del
/// destino. Si algo falla antes del rename, el destino queda intacto y el
/// temporal se borra.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = path.with_extension("tmp");
  let written = write_synced(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, path));

  if let Err(e) = written {
    // Best effort; the original error is what matters.
    let _ = fs::remove_file(&tmp_path);
    return Err(e);
  }

  debug!(path = %path.display(), bytes = contents.len(), "file written");
  Ok(())
}

fn write_synced(path: &Path, contents: &str) -> io::Result<()> {
  let mut file = fs::File::create(path)?;
  file.write_all(contents.as_bytes())?;
  file.sync_all()
}

/// Lee el fichero completo. `Ok(None)` si no existe.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e),
  }
}
