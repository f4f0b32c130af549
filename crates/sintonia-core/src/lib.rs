pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;
pub mod taste;

pub use errors::{CoreError, TasteError};
