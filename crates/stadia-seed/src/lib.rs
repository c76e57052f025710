//! Configuration and entry logic for the `stadia-seed` binary.
//!
//! Settings come from an optional `seed.toml` in the working directory,
//! overridden by `STADIA_*` environment variables. Every field has a default,
//! so a bare run rebuilds `Data.db` from the CSV files in the current
//! directory.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use stadia_core::{
  account::{AccessLevel, CredentialPolicy, NewAccount},
  matching::MatchStrategy,
  plan::{SeedPlan, SeedReport},
};
use stadia_store_sqlite::SqliteStore;

/// Looked up relative to the working directory; absence is not an error.
pub const CONFIG_FILE: &str = "seed.toml";

pub const ENV_PREFIX: &str = "STADIA";

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SeedConfig {
  pub database_path:     PathBuf,
  /// Directory holding `teams.csv` and the three dependent data files.
  pub data_dir:          PathBuf,
  pub match_strategy:    MatchStrategy,
  pub credential_policy: CredentialPolicy,
  pub admin_username:    String,
  pub admin_password:    String,
}

impl Default for SeedConfig {
  fn default() -> Self {
    Self {
      database_path:     PathBuf::from("Data.db"),
      data_dir:          PathBuf::from("."),
      match_strategy:    MatchStrategy::default(),
      credential_policy: CredentialPolicy::default(),
      admin_username:    "admin".to_owned(),
      admin_password:    "password".to_owned(),
    }
  }
}

impl SeedConfig {
  /// Load from [`CONFIG_FILE`] and the environment.
  pub fn load() -> anyhow::Result<Self> { Self::load_from(Path::new(CONFIG_FILE)) }

  pub fn load_from(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()
      .with_context(|| format!("failed to read config file {path:?}"))?;

    settings
      .try_deserialize()
      .context("failed to deserialise SeedConfig")
  }

  pub fn plan(&self) -> stadia_core::Result<SeedPlan> {
    let admin = NewAccount::new(
      self.admin_username.clone(),
      self.admin_password.clone(),
      AccessLevel::Admin,
    );
    Ok(
      SeedPlan::standard(&self.data_dir, admin)?
        .with_strategy(self.match_strategy)
        .with_credentials(self.credential_policy),
    )
  }
}

// ─── Run ──────────────────────────────────────────────────────────────────────

/// Open the database, run the standard plan in one transaction, commit and
/// close.
pub fn run(config: &SeedConfig) -> anyhow::Result<SeedReport> {
  let plan = config.plan().context("invalid seed plan")?;

  let mut store = SqliteStore::open(&config.database_path).with_context(|| {
    format!("failed to open database at {:?}", config.database_path)
  })?;

  tracing::info!(
    database = %config.database_path.display(),
    data_dir = %config.data_dir.display(),
    strategy = ?config.match_strategy,
    "seeding"
  );

  let report = store.seed(&plan).context("seed failed")?;
  store.close().context("failed to close database")?;
  Ok(report)
}
