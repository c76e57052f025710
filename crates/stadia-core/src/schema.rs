//! Typed table definitions.
//!
//! Table and column names are [`Ident`]s, validated once at construction, so
//! nothing caller-supplied reaches a DDL statement unchecked. Rendering to SQL
//! is the storage backend's job.

use std::fmt;

use crate::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// A table or column name matching `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
  pub fn new(name: impl Into<String>) -> Result<Self> {
    let name = name.into();
    let mut chars = name.chars();
    let valid = match chars.next() {
      Some(c) if c.is_ascii_alphabetic() || c == '_' => {
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
      }
      _ => false,
    };

    if valid {
      Ok(Self(name))
    } else {
      Err(Error::InvalidIdentifier(name))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Ident {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// Declared SQLite storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
  Integer,
  Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
  pub name: Ident,
  pub ty:   ColumnType,
}

impl Column {
  pub fn new(name: &str, ty: ColumnType) -> Result<Self> {
    Ok(Self { name: Ident::new(name)?, ty })
  }

  pub fn text(name: &str) -> Result<Self> { Self::new(name, ColumnType::Text) }
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// How a table refers back to `teams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
  /// Keyed by `id`, which references `teams(id)`. Filled from a CSV file.
  Dependent,
  /// Keyed by `teamID` (referencing `teams(id)`) plus a `purchaseID`.
  /// Created empty.
  Ledger,
}

/// A table to be created, with its caller-declared columns in order.
///
/// The key columns implied by [`TableKind`] are not part of `columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
  pub name:    Ident,
  pub kind:    TableKind,
  pub columns: Vec<Column>,
}

impl TableDef {
  /// A dependent table whose declared columns are all `TEXT`.
  pub fn dependent(name: &str, columns: &[&str]) -> Result<Self> {
    Self::with_text_columns(name, TableKind::Dependent, columns)
  }

  /// A ledger table whose declared columns are all `TEXT`.
  pub fn ledger(name: &str, columns: &[&str]) -> Result<Self> {
    Self::with_text_columns(name, TableKind::Ledger, columns)
  }

  fn with_text_columns(
    name:    &str,
    kind:    TableKind,
    columns: &[&str],
  ) -> Result<Self> {
    Ok(Self {
      name: Ident::new(name)?,
      kind,
      columns: columns
        .iter()
        .map(|c| Column::text(c))
        .collect::<Result<_>>()?,
    })
  }

  /// Number of fields a CSV record must carry for this table: the team name
  /// followed by one field per declared column.
  pub fn record_width(&self) -> usize { self.columns.len() + 1 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_plain_identifiers() {
    for name in ["teams", "teamNames", "_x", "seat_cap2"] {
      assert_eq!(Ident::new(name).unwrap().as_str(), name);
    }
  }

  #[test]
  fn rejects_injection_and_garbage() {
    for name in ["", "1abc", "a b", "x); DROP TABLE teams; --", "naïve", "a-b"] {
      assert!(
        matches!(Ident::new(name), Err(Error::InvalidIdentifier(n)) if n == name),
        "{name:?} should be rejected"
      );
    }
  }

  #[test]
  fn table_def_propagates_bad_column() {
    let err = TableDef::dependent("souvenir", &["items", "price;"]).unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier(n) if n == "price;"));
  }

  #[test]
  fn column_keeps_declared_type() {
    let col = Column::new("quantity", ColumnType::Integer).unwrap();
    assert_eq!(col.name.as_str(), "quantity");
    assert_eq!(col.ty, ColumnType::Integer);
    assert!(Column::new("two words", ColumnType::Integer).is_err());
  }

  #[test]
  fn record_width_counts_team_field() {
    let def = TableDef::dependent("souvenir", &["items", "price"]).unwrap();
    assert_eq!(def.kind, TableKind::Dependent);
    assert_eq!(def.record_width(), 3);
    assert!(def.columns.iter().all(|c| c.ty == ColumnType::Text));
  }
}
