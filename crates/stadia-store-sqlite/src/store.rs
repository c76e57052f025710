//! [`SqliteStore`] and [`Session`], the SQLite implementation of
//! [`SeedStore`].

use std::path::Path;

use rusqlite::{Connection, Transaction};
use stadia_core::{
  account::{CredentialPolicy, NewAccount},
  catalog::{PurchaseLine, Souvenir, StadiumInfo},
  matching::MatchStrategy,
  plan::{SeedPlan, SeedReport, run_plan},
  schema::{Ident, TableDef},
  store::SeedStore,
  team::Team,
};

use crate::{Error, Result, ops, schema::PRAGMAS};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A seed database backed by a single SQLite file.
///
/// Owns its connection; it is closed when the store is dropped.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) the database at `path` with foreign keys enforced.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory database, mostly for tests.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(PRAGMAS)?;
    Ok(Self { conn })
  }

  /// Begin a transaction. Nothing it writes is visible to later sessions
  /// until [`Session::commit`]; dropping it rolls back.
  pub fn session(&mut self) -> Result<Session<'_>> {
    Ok(Session { tx: self.conn.transaction()? })
  }

  /// Execute `plan` in one transaction and commit it.
  pub fn seed(&mut self, plan: &SeedPlan) -> Result<SeedReport> {
    let session = self.session()?;
    let report = run_plan(&session, plan)?;
    session.commit()?;
    tracing::info!(?report, "seed committed");
    Ok(report)
  }

  pub fn teams(&self) -> Result<Vec<Team>> { ops::teams(&self.conn) }

  pub fn team_id(&self, name: &str) -> Result<Option<i64>> {
    ops::team_id(&self.conn, name)
  }

  /// True if an `ADMIN` account named `username` accepts `password`.
  pub fn check_login(&self, username: &str, password: &str) -> Result<bool> {
    ops::check_login(&self.conn, username, password)
  }

  pub fn row_count(&self, table: &Ident) -> Result<i64> {
    ops::row_count(&self.conn, table)
  }

  // Application queries over the standard tables. Each write is its own
  // implicit transaction except `add_purchase`.

  pub fn team_exists(&self, name: &str) -> Result<bool> {
    ops::team_exists(&self.conn, name)
  }

  pub fn team_name(&self, id: i64) -> Result<Option<String>> {
    ops::team_name(&self.conn, id)
  }

  pub fn souvenirs(&self, team: &str) -> Result<Vec<Souvenir>> {
    ops::souvenirs(&self.conn, team)
  }

  pub fn souvenir_price(&self, team: &str, item: &str) -> Result<Option<String>> {
    ops::souvenir_price(&self.conn, team, item)
  }

  pub fn souvenir_exists(&self, team: &str, item: &str) -> Result<bool> {
    ops::souvenir_exists(&self.conn, team, item)
  }

  /// Fails with [`Error::TeamNotFound`] if `team` is not in `teams`.
  pub fn add_souvenir(&self, team: &str, item: &str, price: &str) -> Result<()> {
    ops::add_souvenir(&self.conn, team, item, price)
  }

  pub fn update_souvenir_price(&self, team: &str, item: &str, price: &str) -> Result<usize> {
    ops::update_souvenir_price(&self.conn, team, item, price)
  }

  pub fn delete_souvenir(&self, team: &str, item: &str) -> Result<usize> {
    ops::delete_souvenir(&self.conn, team, item)
  }

  /// Fails with [`Error::TeamNotFound`] if `team` is not in `teams`.
  pub fn add_info(&self, team: &str, info: &StadiumInfo) -> Result<()> {
    ops::add_info(&self.conn, team, info)
  }

  pub fn information(&self, team_id: i64) -> Result<Option<StadiumInfo>> {
    ops::information(&self.conn, team_id)
  }

  pub fn update_information(&self, team_id: i64, info: &StadiumInfo) -> Result<usize> {
    ops::update_information(&self.conn, team_id, info)
  }

  pub fn next_purchase_id(&self) -> Result<i64> { ops::next_purchase_id(&self.conn) }

  /// Record every line of one purchase under a single new id, atomically.
  pub fn add_purchase(&mut self, lines: &[PurchaseLine]) -> Result<i64> {
    let tx = self.conn.transaction()?;
    let id = ops::add_purchase(&tx, lines)?;
    tx.commit()?;
    Ok(id)
  }

  pub fn purchase(&self, purchase_id: i64) -> Result<Vec<PurchaseLine>> {
    ops::purchase(&self.conn, purchase_id)
  }

  /// Close the connection, surfacing any error SQLite reports.
  pub fn close(self) -> Result<()> {
    self.conn.close().map_err(|(_, e)| Error::from(e))
  }

  #[cfg(test)]
  pub(crate) fn conn(&self) -> &Connection { &self.conn }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// One open transaction over a [`SqliteStore`]'s connection.
pub struct Session<'c> {
  tx: Transaction<'c>,
}

impl Session<'_> {
  pub fn commit(self) -> Result<()> {
    self.tx.commit()?;
    Ok(())
  }

  pub fn rollback(self) -> Result<()> {
    self.tx.rollback()?;
    Ok(())
  }
}

impl SeedStore for Session<'_> {
  type Error = Error;

  fn drop_table(&self, name: &Ident) -> Result<()> { ops::drop_table(&self.tx, name) }

  fn import_teams(&self, path: &Path) -> Result<usize> {
    ops::import_teams(&self.tx, path)
  }

  fn teams(&self) -> Result<Vec<Team>> { ops::teams(&self.tx) }

  fn import_file(
    &self,
    path: &Path,
    table: &TableDef,
    strategy: MatchStrategy,
  ) -> Result<usize> {
    ops::import_file(&self.tx, path, table, strategy)
  }

  fn create_table(&self, table: &TableDef) -> Result<()> {
    ops::create_table(&self.tx, table)
  }

  fn import_account(
    &self,
    account: &NewAccount,
    policy: CredentialPolicy,
  ) -> Result<()> {
    ops::import_account(&self.tx, account, policy)
  }
}
