//! Associating dependent CSV records with teams.
//!
//! [`MatchStrategy::Join`] looks each record's team name up by value.
//! [`MatchStrategy::LegacyMerge`] reproduces the historical single-pass
//! merge-scan, which is only correct when the records are grouped by team in
//! the same order as the `teams` table. Out-of-order input is misassigned or
//! dropped without error under that strategy.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{rows::Record, team::Team};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
  #[default]
  Join,
  LegacyMerge,
}

/// A record resolved to the team id it will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assigned<'a> {
  pub team_id: i64,
  pub values:  &'a [String],
}

/// Outcome of matching one file's records against the teams table.
#[derive(Debug, Default)]
pub struct Assignment<'a> {
  pub rows:    Vec<Assigned<'a>>,
  /// Records that were not assigned to any team.
  pub skipped: usize,
}

/// Assign team ids to `records`. `teams` must be in fetch (id) order.
pub fn assign<'a>(
  teams:    &[Team],
  records:  &'a [Record],
  strategy: MatchStrategy,
) -> Assignment<'a> {
  let rows = match strategy {
    MatchStrategy::Join => join(teams, records),
    MatchStrategy::LegacyMerge => legacy_merge(teams, records),
  };
  let skipped = records.len() - rows.len();
  Assignment { rows, skipped }
}

fn join<'a>(teams: &[Team], records: &'a [Record]) -> Vec<Assigned<'a>> {
  // Team names are not unique; the lowest id wins.
  let mut by_name: HashMap<&str, i64> = HashMap::with_capacity(teams.len());
  for team in teams {
    by_name.entry(team.name.as_str()).or_insert(team.id);
  }

  records
    .iter()
    .filter_map(|record| match by_name.get(record.team()) {
      Some(&team_id) => Some(Assigned { team_id, values: record.values() }),
      None => {
        tracing::debug!(
          line = record.line,
          team = record.team(),
          "no team with this name; record skipped"
        );
        None
      }
    })
    .collect()
}

/// The id emitted is a positional counter, not `Team::id`: it starts at 1 and
/// advances once per team left behind. The record cursor never rewinds.
fn legacy_merge<'a>(teams: &[Team], records: &'a [Record]) -> Vec<Assigned<'a>> {
  let mut out = Vec::new();
  let mut count: i64 = 1;
  let mut i = 0;

  for team in teams {
    while i < records.len() {
      if records[i].team() == team.name {
        out.push(Assigned { team_id: count, values: records[i].values() });
        i += 1;
      } else {
        count += 1;
        break;
      }
    }
  }

  if i < records.len() {
    tracing::debug!(
      line = records[i].line,
      remaining = records.len() - i,
      "merge-scan stopped before end of input"
    );
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn teams(names: &[&str]) -> Vec<Team> {
    names
      .iter()
      .enumerate()
      .map(|(i, n)| Team::new(i as i64 + 1, *n))
      .collect()
  }

  fn records(rows: &[&[&str]]) -> Vec<Record> {
    rows
      .iter()
      .enumerate()
      .map(|(i, r)| Record::new(i as u64 + 1, r))
      .collect()
  }

  fn flat(a: &Assignment<'_>) -> Vec<(i64, Vec<String>)> {
    a.rows.iter().map(|r| (r.team_id, r.values.to_vec())).collect()
  }

  fn row(id: i64, values: &[&str]) -> (i64, Vec<String>) {
    (id, values.iter().map(|v| (*v).to_owned()).collect())
  }

  #[test]
  fn grouped_input_agrees_across_strategies() {
    let t = teams(&["Alpha", "Beta"]);
    let r = records(&[&["Alpha", "x", "1"], &["Alpha", "y", "2"], &["Beta", "z", "3"]]);
    let expected = vec![row(1, &["x", "1"]), row(1, &["y", "2"]), row(2, &["z", "3"])];

    for strategy in [MatchStrategy::Join, MatchStrategy::LegacyMerge] {
      let a = assign(&t, &r, strategy);
      assert_eq!(flat(&a), expected, "{strategy:?}");
      assert_eq!(a.skipped, 0);
    }
  }

  #[test]
  fn legacy_merge_drops_out_of_order_rows() {
    let t = teams(&["Alpha", "Beta"]);
    let r = records(&[&["Beta", "z", "3"], &["Alpha", "x", "1"]]);

    let a = assign(&t, &r, MatchStrategy::LegacyMerge);
    assert_eq!(flat(&a), vec![row(2, &["z", "3"])]);
    assert_eq!(a.skipped, 1);
  }

  #[test]
  fn join_handles_out_of_order_rows() {
    let t = teams(&["Alpha", "Beta"]);
    let r = records(&[&["Beta", "z", "3"], &["Alpha", "x", "1"]]);

    let a = assign(&t, &r, MatchStrategy::Join);
    assert_eq!(flat(&a), vec![row(2, &["z", "3"]), row(1, &["x", "1"])]);
  }

  #[test]
  fn join_skips_unknown_teams() {
    let t = teams(&["Alpha", "Beta"]);
    let r = records(&[&["Alpha", "x"], &["Gamma", "q"], &["Beta", "z"]]);

    let a = assign(&t, &r, MatchStrategy::Join);
    assert_eq!(flat(&a), vec![row(1, &["x"]), row(2, &["z"])]);
    assert_eq!(a.skipped, 1);
  }

  #[test]
  fn legacy_merge_stalls_on_unknown_team() {
    let t = teams(&["Alpha", "Beta"]);
    let r = records(&[&["Alpha", "x"], &["Gamma", "q"], &["Beta", "z"]]);

    // "Gamma" never matches, so the cursor is stuck on it for every later team.
    let a = assign(&t, &r, MatchStrategy::LegacyMerge);
    assert_eq!(flat(&a), vec![row(1, &["x"])]);
    assert_eq!(a.skipped, 2);
  }

  #[test]
  fn legacy_merge_uses_position_not_team_id() {
    let t = vec![Team::new(10, "Alpha"), Team::new(20, "Beta")];
    let r = records(&[&["Alpha", "x"], &["Beta", "z"]]);

    assert_eq!(
      flat(&assign(&t, &r, MatchStrategy::LegacyMerge)),
      vec![row(1, &["x"]), row(2, &["z"])]
    );
    assert_eq!(
      flat(&assign(&t, &r, MatchStrategy::Join)),
      vec![row(10, &["x"]), row(20, &["z"])]
    );
  }

  #[test]
  fn legacy_merge_counts_teams_without_rows() {
    let t = teams(&["Alpha", "Beta", "Gamma"]);
    let r = records(&[&["Gamma", "g"]]);

    let a = assign(&t, &r, MatchStrategy::LegacyMerge);
    assert_eq!(flat(&a), vec![row(3, &["g"])]);
  }

  #[test]
  fn duplicate_team_names_join_to_first_id() {
    let t = teams(&["Alpha", "Alpha"]);
    let r = records(&[&["Alpha", "x"]]);
    assert_eq!(flat(&assign(&t, &r, MatchStrategy::Join)), vec![row(1, &["x"])]);
  }

  #[test]
  fn no_teams_assigns_nothing() {
    let r = records(&[&["Alpha", "x"]]);
    for strategy in [MatchStrategy::Join, MatchStrategy::LegacyMerge] {
      let a = assign(&[], &r, strategy);
      assert!(a.rows.is_empty());
      assert_eq!(a.skipped, 1);
    }
  }
}
