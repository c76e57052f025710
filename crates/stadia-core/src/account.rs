//! Accounts and how their passwords are stored.
//!
//! The default [`CredentialPolicy::Plaintext`] writes the password verbatim.
//! [`CredentialPolicy::Argon2`] stores an argon2id PHC string instead; login
//! checks accept either form.

use std::{fmt, str::FromStr};

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;
use serde::Deserialize;

use crate::{Error, Result};

/// Name of the accounts table.
pub const ACCOUNTS_TABLE: &str = "accounts";

// ─── Access level ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
  Admin,
  User,
}

impl AccessLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Admin => "ADMIN",
      Self::User => "USER",
    }
  }
}

impl fmt::Display for AccessLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AccessLevel {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "ADMIN" => Ok(Self::Admin),
      "USER" => Ok(Self::User),
      other => Err(Error::UnknownAccessLevel(other.to_owned())),
    }
  }
}

// ─── Credential policy ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialPolicy {
  #[default]
  Plaintext,
  Argon2,
}

impl CredentialPolicy {
  /// The value to write into the `password` column.
  pub fn encode(self, password: &str) -> Result<String> {
    match self {
      Self::Plaintext => Ok(password.to_owned()),
      Self::Argon2 => {
        let salt = SaltString::generate(&mut OsRng);
        Ok(
          Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::PasswordHash(e.to_string()))?
            .to_string(),
        )
      }
    }
  }
}

/// Check `candidate` against a stored `password` column value.
///
/// Values that parse as an argon2 PHC string are verified with argon2; any
/// other value is compared verbatim.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
  if stored.starts_with("$argon2")
    && let Ok(parsed) = PasswordHash::new(stored)
  {
    return Argon2::default()
      .verify_password(candidate.as_bytes(), &parsed)
      .is_ok();
  }
  stored == candidate
}

// ─── Account ─────────────────────────────────────────────────────────────────

/// An account to insert. Usernames are not unique.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
  pub username: String,
  pub password: String,
  pub level:    AccessLevel,
}

impl NewAccount {
  pub fn new(
    username: impl Into<String>,
    password: impl Into<String>,
    level:    AccessLevel,
  ) -> Self {
    Self { username: username.into(), password: password.into(), level }
  }
}

impl fmt::Debug for NewAccount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NewAccount")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("level", &self.level)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn access_level_text_form() {
    assert_eq!(AccessLevel::Admin.to_string(), "ADMIN");
    assert_eq!("USER".parse::<AccessLevel>().unwrap(), AccessLevel::User);
    assert!(matches!(
      "admin".parse::<AccessLevel>(),
      Err(Error::UnknownAccessLevel(s)) if s == "admin"
    ));
  }

  #[test]
  fn plaintext_is_stored_verbatim() {
    let stored = CredentialPolicy::Plaintext.encode("password").unwrap();
    assert_eq!(stored, "password");
    assert!(verify_password(&stored, "password"));
    assert!(!verify_password(&stored, "Password"));
  }

  #[test]
  fn argon2_hash_verifies() {
    let stored = CredentialPolicy::Argon2.encode("password").unwrap();
    assert!(stored.starts_with("$argon2id$"));
    assert_ne!(stored, "password");
    assert!(verify_password(&stored, "password"));
    assert!(!verify_password(&stored, "wrong"));
    // The hash string itself is not a valid password.
    assert!(!verify_password(&stored, &stored));
  }

  #[test]
  fn debug_redacts_password() {
    let acct = NewAccount::new("admin", "hunter2", AccessLevel::Admin);
    let dbg = format!("{acct:?}");
    assert!(dbg.contains("admin"));
    assert!(!dbg.contains("hunter2"));
  }
}
