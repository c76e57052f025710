//! stadia-seed binary.
//!
//! Drops and rebuilds the stadium database from CSV files: `teams`,
//! `distance`, `information`, `souvenir`, `accounts` (one administrator) and
//! an empty `purchases` table. Takes no arguments; see [`stadia_seed::SeedConfig`]
//! for the optional `seed.toml` / `STADIA_*` settings.

use stadia_seed::SeedConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let config = SeedConfig::load()?;
  let report = stadia_seed::run(&config)?;

  tracing::info!(
    teams = report.teams,
    accounts = report.accounts,
    "database rebuilt"
  );
  Ok(())
}
