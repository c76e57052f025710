//! Team, the reference entity every other table points at.

/// Name of the reference table.
pub const TEAMS_TABLE: &str = "teams";

/// One row of the `teams` table. `id` is generated by the store in insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
  pub id:   i64,
  pub name: String,
}

impl Team {
  pub fn new(id: i64, name: impl Into<String>) -> Self {
    Self { id, name: name.into() }
  }
}
