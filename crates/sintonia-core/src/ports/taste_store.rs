use std::path::PathBuf;
use std::sync::Mutex;

use crate::taste::TasteBook;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("io error on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed taste store {path}: {reason}")]
  Malformed { path: PathBuf, reason: String },

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port de persistencia del modelo de gustos.
///
/// El mapa completo es la unidad de persistencia: se carga entero y se guarda
/// entero. `load` sobre un almacén vacío devuelve un [`TasteBook`] vacío;
/// `save` es todo-o-nada.
pub trait TasteStore: Send + Sync {
  fn load(&self) -> Result<TasteBook, StoreError>;
  fn save(&self, book: &TasteBook) -> Result<(), StoreError>;
}

/// Almacén en memoria, aislado por instancia. Pensado para tests.
#[derive(Debug, Default)]
pub struct InMemoryTasteStore {
  book: Mutex<TasteBook>,
}

impl InMemoryTasteStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_book(book: TasteBook) -> Self {
    Self { book: Mutex::new(book) }
  }
}

impl TasteStore for InMemoryTasteStore {
  fn load(&self) -> Result<TasteBook, StoreError> {
    let guard = self.book.lock().map_err(|_| StoreError::Internal("taste store mutex poisoned".to_string()))?;
    Ok(guard.clone())
  }

  fn save(&self, book: &TasteBook) -> Result<(), StoreError> {
    let mut guard = self.book.lock().map_err(|_| StoreError::Internal("taste store mutex poisoned".to_string()))?;
    *guard = book.clone();
    Ok(())
  }
}
