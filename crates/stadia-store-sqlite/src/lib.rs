//! SQLite backend for the stadia seeder.
//!
//! Wraps a single [`rusqlite::Connection`]. A seed run borrows it for one
//! transaction ([`Session`]), which implements [`stadia_core::store::SeedStore`].

mod ops;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{Session, SqliteStore};
