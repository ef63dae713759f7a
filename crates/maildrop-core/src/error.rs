//! Error types for `maildrop-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("submission not found: {0}")]
  SubmissionNotFound(Uuid),

  #[error("required field is empty: {0}")]
  EmptyField(&'static str),

  #[error("email address is not valid: {0:?}")]
  InvalidEmail(String),

  #[error("invalid admin credentials")]
  InvalidCredentials,

  #[error("admin panel is locked")]
  Locked,

  /// The submission was persisted but the simulated send did not complete.
  /// Carries the inbox address so the caller can instruct the user to mail
  /// it directly. The persisted record is not rolled back.
  #[error("message could not be sent; email {to} directly")]
  Transport { to: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Wrap a backend error from a [`SubmissionStore`](crate::store::SubmissionStore).
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
