//! Error types for `stadia-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("file not found: {}", .0.display())]
  FileNotFound(PathBuf),

  /// A CSV record whose field count does not match the target table.
  #[error(
    "malformed row at {}:{line}: expected {expected} fields, found {found}",
    .path.display()
  )]
  MalformedRow {
    path:     PathBuf,
    line:     u64,
    expected: usize,
    found:    usize,
  },

  #[error("invalid SQL identifier: {0:?}")]
  InvalidIdentifier(String),

  #[error("unknown access level: {0:?}")]
  UnknownAccessLevel(String),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
