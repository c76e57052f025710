//! The fixed seed sequence.
//!
//! A [`SeedPlan`] is plain data describing one run. [`run_plan`] executes it
//! step by step over any [`SeedStore`]; committing is the caller's concern.

use std::path::{Path, PathBuf};

use crate::{
  Result,
  account::{ACCOUNTS_TABLE, CredentialPolicy, NewAccount},
  matching::MatchStrategy,
  schema::{Ident, TableDef},
  store::SeedStore,
  team::TEAMS_TABLE,
};

// ─── Plan ────────────────────────────────────────────────────────────────────

/// A dependent table filled from a CSV file.
#[derive(Debug, Clone)]
pub struct DependentImport {
  pub file:  PathBuf,
  pub table: TableDef,
}

#[derive(Debug, Clone)]
pub struct SeedPlan {
  /// Tables dropped, in order, before anything is created.
  pub drops:       Vec<Ident>,
  pub teams_file:  PathBuf,
  pub dependents:  Vec<DependentImport>,
  pub accounts:    Vec<NewAccount>,
  /// Tables created empty after the accounts are seeded.
  pub ledgers:     Vec<TableDef>,
  pub strategy:    MatchStrategy,
  pub credentials: CredentialPolicy,
}

impl SeedPlan {
  /// The stadium data set: teams, distances, stadium information and
  /// souvenirs, one administrator account and an empty purchases ledger.
  /// File names are resolved against `data_dir`.
  pub fn standard(data_dir: &Path, admin: NewAccount) -> Result<Self> {
    let drops = [
      TEAMS_TABLE,
      "distance",
      "information",
      "souvenir",
      ACCOUNTS_TABLE,
      "purchases",
    ]
    .into_iter()
    .map(Ident::new)
    .collect::<Result<_>>()?;

    let dependents = vec![
      DependentImport {
        file:  data_dir.join("nfl_distances.csv"),
        table: TableDef::dependent(
          "distance",
          &["beginStadium", "endStadium", "distanceTo"],
        )?,
      },
      DependentImport {
        file:  data_dir.join("nfl_information.csv"),
        table: TableDef::dependent(
          "information",
          &[
            "stadiumName",
            "seatCap",
            "location",
            "conference",
            "division",
            "surfaceType",
            "roofType",
            "dateOpen",
          ],
        )?,
      },
      DependentImport {
        file:  data_dir.join("nfl_team_souvenir.csv"),
        table: TableDef::dependent("souvenir", &["items", "price"])?,
      },
    ];

    Ok(Self {
      drops,
      teams_file: data_dir.join("teams.csv"),
      dependents,
      accounts: vec![admin],
      ledgers: vec![TableDef::ledger("purchases", &["items", "price", "quantity"])?],
      strategy: MatchStrategy::default(),
      credentials: CredentialPolicy::default(),
    })
  }

  pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
    self.strategy = strategy;
    self
  }

  pub fn with_credentials(mut self, credentials: CredentialPolicy) -> Self {
    self.credentials = credentials;
    self
  }
}

// ─── Execution ───────────────────────────────────────────────────────────────

/// What a run inserted, for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
  pub teams:      usize,
  pub dependents: Vec<(Ident, usize)>,
  pub accounts:   usize,
  pub ledgers:    Vec<Ident>,
}

/// Run every step of `plan` in order: drops, teams, dependent imports,
/// accounts, ledgers. Stops at the first error.
pub fn run_plan<S: SeedStore>(
  store: &S,
  plan: &SeedPlan,
) -> Result<SeedReport, S::Error> {
  let mut report = SeedReport::default();

  for name in &plan.drops {
    tracing::info!(table = %name, "dropping table");
    store.drop_table(name)?;
  }

  report.teams = store.import_teams(&plan.teams_file)?;
  tracing::info!(
    file = %plan.teams_file.display(),
    rows = report.teams,
    "imported teams"
  );

  for dep in &plan.dependents {
    let rows = store.import_file(&dep.file, &dep.table, plan.strategy)?;
    tracing::info!(
      table = %dep.table.name,
      file = %dep.file.display(),
      rows,
      "imported dependent table"
    );
    report.dependents.push((dep.table.name.clone(), rows));
  }

  for account in &plan.accounts {
    store.import_account(account, plan.credentials)?;
    tracing::info!(username = %account.username, level = %account.level, "seeded account");
    report.accounts += 1;
  }

  for ledger in &plan.ledgers {
    store.create_table(ledger)?;
    tracing::info!(table = %ledger.name, "created table");
    report.ledgers.push(ledger.name.clone());
  }

  Ok(report)
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;
  use crate::{account::AccessLevel, schema::TableKind, team::Team};

  /// Records the calls made against it.
  #[derive(Default)]
  struct Recorder {
    calls:   RefCell<Vec<String>>,
    fail_on: Option<&'static str>,
  }

  impl Recorder {
    fn log(&self, call: String) -> crate::Result<()> {
      let hit = self.fail_on.is_some_and(|f| call.starts_with(f));
      self.calls.borrow_mut().push(call);
      if hit {
        return Err(crate::Error::FileNotFound(PathBuf::from("boom.csv")));
      }
      Ok(())
    }
  }

  impl SeedStore for Recorder {
    type Error = crate::Error;

    fn drop_table(&self, name: &Ident) -> crate::Result<()> {
      self.log(format!("drop {name}"))
    }

    fn import_teams(&self, path: &Path) -> crate::Result<usize> {
      self.log(format!("teams {}", path.file_name().unwrap().to_string_lossy()))?;
      Ok(32)
    }

    fn teams(&self) -> crate::Result<Vec<Team>> { Ok(vec![]) }

    fn import_file(
      &self,
      path: &Path,
      table: &TableDef,
      strategy: MatchStrategy,
    ) -> crate::Result<usize> {
      self.log(format!(
        "import {} {} {strategy:?}",
        table.name,
        path.file_name().unwrap().to_string_lossy()
      ))?;
      Ok(table.columns.len())
    }

    fn create_table(&self, table: &TableDef) -> crate::Result<()> {
      self.log(format!("create {}", table.name))
    }

    fn import_account(
      &self,
      account: &NewAccount,
      policy: CredentialPolicy,
    ) -> crate::Result<()> {
      self.log(format!("account {} {} {policy:?}", account.username, account.level))
    }
  }

  fn admin() -> NewAccount { NewAccount::new("admin", "password", AccessLevel::Admin) }

  #[test]
  fn standard_plan_shape() {
    let plan = SeedPlan::standard(Path::new("data"), admin()).unwrap();

    let drops: Vec<_> = plan.drops.iter().map(Ident::as_str).collect();
    assert_eq!(
      drops,
      ["teams", "distance", "information", "souvenir", "accounts", "purchases"]
    );
    assert_eq!(plan.teams_file, Path::new("data").join("teams.csv"));

    let widths: Vec<_> = plan
      .dependents
      .iter()
      .map(|d| (d.table.name.as_str(), d.table.record_width()))
      .collect();
    assert_eq!(widths, [("distance", 4), ("information", 9), ("souvenir", 3)]);

    assert_eq!(plan.ledgers.len(), 1);
    assert_eq!(plan.ledgers[0].kind, TableKind::Ledger);
    assert_eq!(plan.strategy, MatchStrategy::Join);
    assert_eq!(plan.credentials, CredentialPolicy::Plaintext);
  }

  #[test]
  fn run_plan_follows_fixed_order() {
    let store = Recorder::default();
    let plan = SeedPlan::standard(Path::new("."), admin())
      .unwrap()
      .with_strategy(MatchStrategy::LegacyMerge);

    let report = run_plan(&store, &plan).unwrap();

    assert_eq!(
      *store.calls.borrow(),
      [
        "drop teams",
        "drop distance",
        "drop information",
        "drop souvenir",
        "drop accounts",
        "drop purchases",
        "teams teams.csv",
        "import distance nfl_distances.csv LegacyMerge",
        "import information nfl_information.csv LegacyMerge",
        "import souvenir nfl_team_souvenir.csv LegacyMerge",
        "account admin ADMIN Plaintext",
        "create purchases",
      ]
    );
    assert_eq!(report.teams, 32);
    assert_eq!(report.dependents.iter().map(|(_, n)| *n).collect::<Vec<_>>(), [3, 8, 2]);
    assert_eq!(report.accounts, 1);
  }

  #[test]
  fn run_plan_stops_at_first_error() {
    let store = Recorder { fail_on: Some("import information"), ..Default::default() };
    let plan = SeedPlan::standard(Path::new("."), admin()).unwrap();

    assert!(run_plan(&store, &plan).is_err());
    let calls = store.calls.borrow();
    assert_eq!(calls.last().unwrap(), "import information nfl_information.csv Join");
    assert!(!calls.iter().any(|c| c.starts_with("account")));
  }
}
