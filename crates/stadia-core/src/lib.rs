//! Core types and trait definitions for the stadia database seeder.
//!
//! This crate is deliberately free of SQL. It owns the typed table
//! definitions, CSV reading, the team-matching algorithms and the fixed seed
//! plan; storage backends implement [`store::SeedStore`].

pub mod account;
pub mod catalog;
pub mod error;
pub mod matching;
pub mod plan;
pub mod rows;
pub mod schema;
pub mod store;
pub mod team;

pub use error::{Error, Result};
