//! The `SeedStore` trait.
//!
//! Implemented by storage backends (e.g. `stadia-store-sqlite`). Every call
//! goes through an explicit handle; an implementation is expected to scope
//! all calls on one value to a single transaction.

use std::path::Path;

use crate::{
  account::{CredentialPolicy, NewAccount},
  matching::MatchStrategy,
  schema::{Ident, TableDef},
  team::Team,
};

pub trait SeedStore {
  type Error: std::error::Error + From<crate::Error>;

  /// `DROP TABLE IF EXISTS`. Dropping a missing table is not an error.
  fn drop_table(&self, name: &Ident) -> Result<(), Self::Error>;

  /// Create `teams` if absent and insert one row per line of `path`.
  /// Returns the number of teams inserted. No deduplication.
  fn import_teams(&self, path: &Path) -> Result<usize, Self::Error>;

  /// All teams in id order.
  fn teams(&self) -> Result<Vec<Team>, Self::Error>;

  /// Create the dependent `table` if absent, then insert the records of
  /// `path`, each keyed by the team id `strategy` assigns to it. Returns the
  /// number of rows inserted.
  fn import_file(
    &self,
    path: &Path,
    table: &TableDef,
    strategy: MatchStrategy,
  ) -> Result<usize, Self::Error>;

  /// Create a table if absent, with no rows.
  fn create_table(&self, table: &TableDef) -> Result<(), Self::Error>;

  /// Create `accounts` if absent and insert `account`, storing its password
  /// as `policy` dictates. No existence check.
  fn import_account(
    &self,
    account: &NewAccount,
    policy: CredentialPolicy,
  ) -> Result<(), Self::Error>;
}
