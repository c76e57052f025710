//! Records read and written by the application after seeding: souvenirs,
//! stadium information and purchases.
//!
//! Prices and quantities are kept as text to match the seeded columns.

/// A souvenir row joined with its team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Souvenir {
  pub team_id: i64,
  pub item:    String,
  pub price:   String,
}

/// One `information` row, minus its team id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StadiumInfo {
  pub stadium_name: String,
  pub seat_cap:     String,
  pub location:     String,
  pub conference:   String,
  pub division:     String,
  pub surface_type: String,
  pub roof_type:    String,
  pub date_open:    String,
}

/// One line of a purchase. Every line of a purchase shares its
/// `purchaseID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseLine {
  pub team_id:  i64,
  pub item:     String,
  pub price:    String,
  pub quantity: u32,
}

impl PurchaseLine {
  pub fn new(
    team_id:  i64,
    item:     impl Into<String>,
    price:    impl Into<String>,
    quantity: u32,
  ) -> Self {
    Self { team_id, item: item.into(), price: price.into(), quantity }
  }
}
