//! SQL text for the stadia schema.
//!
//! Fixed tables are constants. Caller-defined tables are rendered from a
//! [`TableDef`], whose names are already validated [`Ident`]s; they are
//! quoted here as well so reserved words survive.

use stadia_core::schema::{ColumnType, Ident, TableDef, TableKind};

/// Executed once per connection.
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

// ─── Fixed tables ────────────────────────────────────────────────────────────

pub const CREATE_TEAMS: &str = "
CREATE TABLE IF NOT EXISTS teams (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    teamNames TEXT
)";

pub const INSERT_TEAM: &str = "INSERT INTO teams (teamNames) VALUES (?1)";

pub const SELECT_TEAMS: &str = "SELECT id, teamNames FROM teams ORDER BY id";

pub const SELECT_TEAM_ID: &str =
  "SELECT id FROM teams WHERE teamNames = ?1 ORDER BY id LIMIT 1";

// Usernames are not unique; repeated seeding without a drop duplicates rows.
pub const CREATE_ACCOUNTS: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    username TEXT,
    password TEXT,
    level    TEXT
)";

pub const INSERT_ACCOUNT: &str =
  "INSERT INTO accounts (username, password, level) VALUES (?1, ?2, ?3)";

pub const SELECT_ADMIN_PASSWORDS: &str =
  "SELECT password FROM accounts WHERE username = ?1 AND level = 'ADMIN'";

// ─── Application queries ─────────────────────────────────────────────────────
//
// These address the tables of the standard plan by their fixed names.

pub const TEAM_EXISTS: &str =
  "SELECT EXISTS (SELECT 1 FROM teams WHERE teamNames = ?1)";

pub const SELECT_TEAM_NAME: &str = "SELECT teamNames FROM teams WHERE id = ?1";

pub const SELECT_SOUVENIRS: &str = "
SELECT souvenir.id, souvenir.items, souvenir.price
FROM souvenir JOIN teams ON teams.id = souvenir.id
WHERE teams.teamNames = ?1
ORDER BY souvenir.rowid";

pub const SELECT_SOUVENIR_PRICE: &str = "
SELECT souvenir.price
FROM souvenir JOIN teams ON teams.id = souvenir.id
WHERE teams.teamNames = ?1 AND souvenir.items = ?2
ORDER BY souvenir.rowid LIMIT 1";

pub const SOUVENIR_EXISTS: &str = "
SELECT EXISTS (
  SELECT 1 FROM souvenir JOIN teams ON teams.id = souvenir.id
  WHERE teams.teamNames = ?1 AND souvenir.items = ?2
)";

pub const INSERT_SOUVENIR: &str =
  "INSERT INTO souvenir (id, items, price) VALUES (?1, ?2, ?3)";

pub const UPDATE_SOUVENIR_PRICE: &str = "
UPDATE souvenir SET price = ?3
WHERE items = ?2
  AND id = (SELECT id FROM teams WHERE teamNames = ?1 ORDER BY id LIMIT 1)";

pub const DELETE_SOUVENIR: &str = "
DELETE FROM souvenir
WHERE items = ?2
  AND id = (SELECT id FROM teams WHERE teamNames = ?1 ORDER BY id LIMIT 1)";

pub const INSERT_INFORMATION: &str = "
INSERT INTO information (
    id, stadiumName, seatCap, location, conference, division,
    surfaceType, roofType, dateOpen
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

pub const SELECT_INFORMATION: &str = "
SELECT stadiumName, seatCap, location, conference, division,
       surfaceType, roofType, dateOpen
FROM information WHERE id = ?1 ORDER BY rowid LIMIT 1";

// Conference and division stay as imported.
pub const UPDATE_INFORMATION: &str = "
UPDATE information
SET stadiumName = ?2, seatCap = ?3, location = ?4,
    surfaceType = ?5, roofType = ?6, dateOpen = ?7
WHERE id = ?1";

pub const NEXT_PURCHASE_ID: &str =
  "SELECT COALESCE(MAX(purchaseID), 0) + 1 FROM purchases";

pub const INSERT_PURCHASE: &str = "
INSERT INTO purchases (teamID, purchaseID, items, price, quantity)
VALUES (?1, ?2, ?3, ?4, ?5)";

pub const SELECT_PURCHASE: &str = "
SELECT teamID, items, price, quantity FROM purchases
WHERE purchaseID = ?1 ORDER BY rowid";

// ─── Caller-defined tables ───────────────────────────────────────────────────

fn quote(ident: &Ident) -> String { format!("\"{ident}\"") }

fn column_type(ty: ColumnType) -> &'static str {
  match ty {
    ColumnType::Integer => "INTEGER",
    ColumnType::Text => "TEXT",
  }
}

/// The column that references `teams(id)` for a table of this kind.
pub fn team_key(kind: TableKind) -> &'static str {
  match kind {
    TableKind::Dependent => "id",
    TableKind::Ledger => "teamID",
  }
}

pub fn drop_table(name: &Ident) -> String {
  format!("DROP TABLE IF EXISTS {}", quote(name))
}

/// `CREATE TABLE IF NOT EXISTS` with the key columns for the table's kind,
/// the declared columns in order, and a cascading foreign key to `teams`.
pub fn create_table(def: &TableDef) -> String {
  let mut cols: Vec<String> = match def.kind {
    TableKind::Dependent => vec!["\"id\" INTEGER".to_owned()],
    TableKind::Ledger => vec![
      "\"teamID\" INTEGER".to_owned(),
      "\"purchaseID\" INTEGER".to_owned(),
    ],
  };
  cols.extend(
    def
      .columns
      .iter()
      .map(|c| format!("{} {}", quote(&c.name), column_type(c.ty))),
  );
  cols.push(format!(
    "FOREIGN KEY(\"{}\") REFERENCES teams(id) ON DELETE CASCADE",
    team_key(def.kind)
  ));

  format!(
    "CREATE TABLE IF NOT EXISTS {} ({})",
    quote(&def.name),
    cols.join(", ")
  )
}

/// `INSERT` binding the team key as `?1` and each declared column after it.
pub fn insert_row(def: &TableDef) -> String {
  let names: Vec<String> = std::iter::once(format!("\"{}\"", team_key(def.kind)))
    .chain(def.columns.iter().map(|c| quote(&c.name)))
    .collect();
  let params: Vec<String> =
    (1..=names.len()).map(|i| format!("?{i}")).collect();

  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    quote(&def.name),
    names.join(", "),
    params.join(", ")
  )
}

pub fn count_rows(name: &Ident) -> String {
  format!("SELECT COUNT(*) FROM {}", quote(name))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dependent_ddl() {
    let def = TableDef::dependent("souvenir", &["items", "price"]).unwrap();
    assert_eq!(
      create_table(&def),
      "CREATE TABLE IF NOT EXISTS \"souvenir\" (\"id\" INTEGER, \"items\" TEXT, \
       \"price\" TEXT, FOREIGN KEY(\"id\") REFERENCES teams(id) ON DELETE CASCADE)"
    );
    assert_eq!(
      insert_row(&def),
      "INSERT INTO \"souvenir\" (\"id\", \"items\", \"price\") VALUES (?1, ?2, ?3)"
    );
  }

  #[test]
  fn ledger_ddl() {
    let def = TableDef::ledger("purchases", &["items", "price", "quantity"]).unwrap();
    assert_eq!(
      create_table(&def),
      "CREATE TABLE IF NOT EXISTS \"purchases\" (\"teamID\" INTEGER, \
       \"purchaseID\" INTEGER, \"items\" TEXT, \"price\" TEXT, \"quantity\" TEXT, \
       FOREIGN KEY(\"teamID\") REFERENCES teams(id) ON DELETE CASCADE)"
    );
  }

  #[test]
  fn integer_columns_render_as_integer() {
    use stadia_core::schema::Column;

    let def = TableDef {
      name:    Ident::new("tickets").unwrap(),
      kind:    TableKind::Dependent,
      columns: vec![
        Column::new("section", ColumnType::Text).unwrap(),
        Column::new("seats", ColumnType::Integer).unwrap(),
      ],
    };
    assert_eq!(
      create_table(&def),
      "CREATE TABLE IF NOT EXISTS \"tickets\" (\"id\" INTEGER, \"section\" TEXT, \
       \"seats\" INTEGER, FOREIGN KEY(\"id\") REFERENCES teams(id) ON DELETE CASCADE)"
    );
  }

  #[test]
  fn drop_is_conditional() {
    let name = Ident::new("distance").unwrap();
    assert_eq!(drop_table(&name), "DROP TABLE IF EXISTS \"distance\"");
  }
}
