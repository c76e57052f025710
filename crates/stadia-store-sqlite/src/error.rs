//! Error type for `stadia-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;

use stadia_core::schema::Ident;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] stadia_core::Error),

  /// A DDL statement against `table` failed.
  #[error("schema error on table {table}: {source}")]
  SchemaError {
    table:  String,
    source: rusqlite::Error,
  },

  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("team not found: {0:?}")]
  TeamNotFound(String),

  /// A stored value that does not parse back into its Rust type.
  #[error("cannot decode {column}: {value:?}")]
  Decode { column: &'static str, value: String },

  #[error("database error: {0}")]
  Database(rusqlite::Error),
}

impl Error {
  pub(crate) fn schema(table: &Ident) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
    move |source| Self::SchemaError { table: table.to_string(), source }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    match e {
      rusqlite::Error::SqliteFailure(failure, msg)
        if failure.code == ErrorCode::ConstraintViolation =>
      {
        Self::ConstraintViolation(msg.unwrap_or_else(|| failure.to_string()))
      }
      other => Self::Database(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
