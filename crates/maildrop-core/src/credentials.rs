//! Admin credential checking.
//!
//! The admin view is gated by a single shared secret. The plaintext
//! variant is a cosmetic gate, not a security boundary — anyone who can
//! read the configuration can read the secret. The check is behind a trait
//! so a real mechanism ([`HashedSecret`], or anything stronger) can be
//! substituted without touching the panel's control flow.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// Capability to verify an admin secret. Implementations must be cheap and
/// infallible — a verification error is just `false`.
pub trait CredentialCheck: Send + Sync {
  fn verify(&self, secret: &str) -> bool;
}

/// Plaintext equality against a fixed string.
///
/// No rate limiting, no lockout, no confidentiality. Backs the plain
/// `admin_password` configuration entry.
pub struct StaticSecret(String);

impl StaticSecret {
  pub fn new(secret: impl Into<String>) -> Self {
    Self(secret.into())
  }
}

impl CredentialCheck for StaticSecret {
  fn verify(&self, secret: &str) -> bool {
    secret == self.0
  }
}

/// Argon2 verification against a PHC hash string (`$argon2id$v=19$…`).
///
/// The stronger drop-in: the configuration carries only the hash. The
/// server binary's `--hash-password` helper produces the PHC string.
pub struct HashedSecret(String);

impl HashedSecret {
  pub fn new(phc_hash: impl Into<String>) -> Self {
    Self(phc_hash.into())
  }
}

impl CredentialCheck for HashedSecret {
  fn verify(&self, secret: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(&self.0) else {
      return false;
    };
    Argon2::default()
      .verify_password(secret.as_bytes(), &parsed)
      .is_ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use argon2::{PasswordHasher, password_hash::SaltString};
  use rand_core::OsRng;

  #[test]
  fn static_secret_is_plain_equality() {
    let check = StaticSecret::new("admin123");
    assert!(check.verify("admin123"));
    assert!(!check.verify("admin1234"));
    assert!(!check.verify(""));
  }

  #[test]
  fn hashed_secret_verifies_phc_string() {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"hunter2", &salt)
      .unwrap()
      .to_string();

    let check = HashedSecret::new(hash);
    assert!(check.verify("hunter2"));
    assert!(!check.verify("hunter3"));
  }

  #[test]
  fn hashed_secret_rejects_garbage_hash() {
    let check = HashedSecret::new("not-a-phc-string");
    assert!(!check.verify("anything"));
  }
}
