//! Seed operations over an explicit connection handle.
//!
//! Each function takes the [`Connection`] it runs on. Callers decide the
//! transaction scope: [`Session`](crate::Session) passes its open
//! transaction, [`SqliteStore`](crate::SqliteStore) its bare connection for
//! reads.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use stadia_core::{
  account::{CredentialPolicy, NewAccount, verify_password},
  catalog::{PurchaseLine, Souvenir, StadiumInfo},
  matching::{self, MatchStrategy},
  rows::read_records,
  schema::{Ident, TableDef},
  team::{TEAMS_TABLE, Team},
};

use crate::{Error, Result, schema};

fn teams_ident() -> Result<Ident> { Ok(Ident::new(TEAMS_TABLE)?) }

// ─── Teardown ────────────────────────────────────────────────────────────────

pub fn drop_table(conn: &Connection, name: &Ident) -> Result<()> {
  conn
    .execute(&schema::drop_table(name), [])
    .map_err(Error::schema(name))?;
  Ok(())
}

// ─── DDL ─────────────────────────────────────────────────────────────────────

pub fn create_table(conn: &Connection, def: &TableDef) -> Result<()> {
  conn
    .execute(&schema::create_table(def), [])
    .map_err(Error::schema(&def.name))?;
  Ok(())
}

// ─── Teams ───────────────────────────────────────────────────────────────────

pub fn import_teams(conn: &Connection, path: &Path) -> Result<usize> {
  conn
    .execute(schema::CREATE_TEAMS, [])
    .map_err(Error::schema(&teams_ident()?))?;

  let records = read_records(path, 1)?;

  let mut stmt = conn.prepare_cached(schema::INSERT_TEAM)?;
  for record in &records {
    stmt.execute(rusqlite::params![record.team()])?;
  }
  Ok(records.len())
}

pub fn teams(conn: &Connection) -> Result<Vec<Team>> {
  let mut stmt = conn.prepare(schema::SELECT_TEAMS)?;
  let teams = stmt
    .query_map([], |row| {
      Ok(Team {
        id:   row.get(0)?,
        name: row.get(1)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(teams)
}

pub fn team_id(conn: &Connection, name: &str) -> Result<Option<i64>> {
  Ok(
    conn
      .query_row(schema::SELECT_TEAM_ID, rusqlite::params![name], |r| r.get(0))
      .optional()?,
  )
}

// ─── Dependent tables ────────────────────────────────────────────────────────

pub fn import_file(
  conn:     &Connection,
  path:     &Path,
  def:      &TableDef,
  strategy: MatchStrategy,
) -> Result<usize> {
  create_table(conn, def)?;

  let records = read_records(path, def.record_width())?;
  let teams = teams(conn)?;
  let assignment = matching::assign(&teams, &records, strategy);

  if assignment.skipped > 0 {
    tracing::warn!(
      table = %def.name,
      file = %path.display(),
      skipped = assignment.skipped,
      ?strategy,
      "records not matched to any team"
    );
  }

  let mut stmt = conn.prepare(&schema::insert_row(def))?;
  for row in &assignment.rows {
    let params = std::iter::once(&row.team_id as &dyn rusqlite::ToSql)
      .chain(row.values.iter().map(|v| v as &dyn rusqlite::ToSql));
    stmt.execute(rusqlite::params_from_iter(params))?;
  }
  Ok(assignment.rows.len())
}

// ─── Accounts ────────────────────────────────────────────────────────────────

pub fn import_account(
  conn:    &Connection,
  account: &NewAccount,
  policy:  CredentialPolicy,
) -> Result<()> {
  conn
    .execute(schema::CREATE_ACCOUNTS, [])
    .map_err(Error::schema(&Ident::new(stadia_core::account::ACCOUNTS_TABLE)?))?;

  let stored = policy.encode(&account.password)?;
  conn.execute(
    schema::INSERT_ACCOUNT,
    rusqlite::params![account.username, stored, account.level.as_str()],
  )?;
  Ok(())
}

/// True if an `ADMIN` account named `username` accepts `password`.
pub fn check_login(conn: &Connection, username: &str, password: &str) -> Result<bool> {
  let mut stmt = conn.prepare(schema::SELECT_ADMIN_PASSWORDS)?;
  let stored = stmt
    .query_map(rusqlite::params![username], |r| r.get::<_, Option<String>>(0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(
    stored
      .iter()
      .flatten()
      .any(|s| verify_password(s, password)),
  )
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

pub fn team_exists(conn: &Connection, name: &str) -> Result<bool> {
  Ok(conn.query_row(schema::TEAM_EXISTS, rusqlite::params![name], |r| r.get(0))?)
}

pub fn team_name(conn: &Connection, id: i64) -> Result<Option<String>> {
  Ok(
    conn
      .query_row(schema::SELECT_TEAM_NAME, rusqlite::params![id], |r| r.get(0))
      .optional()?,
  )
}

fn require_team(conn: &Connection, name: &str) -> Result<i64> {
  team_id(conn, name)?.ok_or_else(|| Error::TeamNotFound(name.to_owned()))
}

// ─── Souvenirs ───────────────────────────────────────────────────────────────

pub fn souvenirs(conn: &Connection, team: &str) -> Result<Vec<Souvenir>> {
  let mut stmt = conn.prepare(schema::SELECT_SOUVENIRS)?;
  let rows = stmt
    .query_map(rusqlite::params![team], |row| {
      Ok(Souvenir {
        team_id: row.get(0)?,
        item:    row.get(1)?,
        price:   row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn souvenir_price(conn: &Connection, team: &str, item: &str) -> Result<Option<String>> {
  Ok(
    conn
      .query_row(
        schema::SELECT_SOUVENIR_PRICE,
        rusqlite::params![team, item],
        |r| r.get(0),
      )
      .optional()?,
  )
}

pub fn souvenir_exists(conn: &Connection, team: &str, item: &str) -> Result<bool> {
  Ok(conn.query_row(
    schema::SOUVENIR_EXISTS,
    rusqlite::params![team, item],
    |r| r.get(0),
  )?)
}

pub fn add_souvenir(conn: &Connection, team: &str, item: &str, price: &str) -> Result<()> {
  let id = require_team(conn, team)?;
  conn.execute(schema::INSERT_SOUVENIR, rusqlite::params![id, item, price])?;
  Ok(())
}

/// Returns the number of rows changed.
pub fn update_souvenir_price(
  conn:  &Connection,
  team:  &str,
  item:  &str,
  price: &str,
) -> Result<usize> {
  Ok(conn.execute(
    schema::UPDATE_SOUVENIR_PRICE,
    rusqlite::params![team, item, price],
  )?)
}

/// Returns the number of rows removed.
pub fn delete_souvenir(conn: &Connection, team: &str, item: &str) -> Result<usize> {
  Ok(conn.execute(schema::DELETE_SOUVENIR, rusqlite::params![team, item])?)
}

// ─── Stadium information ─────────────────────────────────────────────────────

pub fn add_info(conn: &Connection, team: &str, info: &StadiumInfo) -> Result<()> {
  let id = require_team(conn, team)?;
  conn.execute(
    schema::INSERT_INFORMATION,
    rusqlite::params![
      id,
      info.stadium_name,
      info.seat_cap,
      info.location,
      info.conference,
      info.division,
      info.surface_type,
      info.roof_type,
      info.date_open,
    ],
  )?;
  Ok(())
}

pub fn information(conn: &Connection, team_id: i64) -> Result<Option<StadiumInfo>> {
  Ok(
    conn
      .query_row(schema::SELECT_INFORMATION, rusqlite::params![team_id], |row| {
        Ok(StadiumInfo {
          stadium_name: row.get(0)?,
          seat_cap:     row.get(1)?,
          location:     row.get(2)?,
          conference:   row.get(3)?,
          division:     row.get(4)?,
          surface_type: row.get(5)?,
          roof_type:    row.get(6)?,
          date_open:    row.get(7)?,
        })
      })
      .optional()?,
  )
}

/// Overwrite a team's stadium fields. `conference` and `division` in `info`
/// are ignored. Returns the number of rows changed.
pub fn update_information(conn: &Connection, team_id: i64, info: &StadiumInfo) -> Result<usize> {
  Ok(conn.execute(
    schema::UPDATE_INFORMATION,
    rusqlite::params![
      team_id,
      info.stadium_name,
      info.seat_cap,
      info.location,
      info.surface_type,
      info.roof_type,
      info.date_open,
    ],
  )?)
}

// ─── Purchases ───────────────────────────────────────────────────────────────

/// One past the highest `purchaseID` recorded, or 1 for an empty table.
pub fn next_purchase_id(conn: &Connection) -> Result<i64> {
  Ok(conn.query_row(schema::NEXT_PURCHASE_ID, [], |r| r.get(0))?)
}

/// Record `lines` under a fresh purchase id and return it.
pub fn add_purchase(conn: &Connection, lines: &[PurchaseLine]) -> Result<i64> {
  let purchase_id = next_purchase_id(conn)?;

  let mut stmt = conn.prepare(schema::INSERT_PURCHASE)?;
  for line in lines {
    stmt.execute(rusqlite::params![
      line.team_id,
      purchase_id,
      line.item,
      line.price,
      line.quantity.to_string(),
    ])?;
  }

  tracing::debug!(purchase_id, lines = lines.len(), "recorded purchase");
  Ok(purchase_id)
}

pub fn purchase(conn: &Connection, purchase_id: i64) -> Result<Vec<PurchaseLine>> {
  let mut stmt = conn.prepare(schema::SELECT_PURCHASE)?;
  let raws = stmt
    .query_map(rusqlite::params![purchase_id], |row| {
      Ok((
        row.get::<_, i64>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get::<_, String>(3)?,
      ))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  raws
    .into_iter()
    .map(|(team_id, item, price, quantity)| {
      let quantity = quantity
        .parse::<u32>()
        .map_err(|_| Error::Decode { column: "quantity", value: quantity.clone() })?;
      Ok(PurchaseLine { team_id, item, price, quantity })
    })
    .collect()
}

// ─── Inspection ──────────────────────────────────────────────────────────────

pub fn row_count(conn: &Connection, name: &Ident) -> Result<i64> {
  Ok(conn.query_row(&schema::count_rows(name), [], |r| r.get(0))?)
}
