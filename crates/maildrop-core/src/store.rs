//! The `SubmissionStore` trait — the persistence port.
//!
//! The trait is implemented by storage backends (e.g. `maildrop-store-json`).
//! Higher layers (`maildrop-api`, the admin panel) depend on this
//! abstraction, not on any concrete backend.
//!
//! The port is deliberately whole-collection: the entire list persists as a
//! single serialized blob, and every operation is a full
//! read-modify-write. Concurrent writers therefore clobber each other under
//! last-write-wins — an accepted limitation for a single-operator tool.
//! Callers wanting stronger guarantees must serialize access through a
//! single owning process.

use std::future::Future;

use crate::submission::Submission;

/// Abstraction over a maildrop persistence backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the whole collection, insertion order preserved.
  ///
  /// A missing or unreadable blob is reported as an empty collection, never
  /// as an error — both the writer and the admin panel treat "nothing
  /// stored yet" and "blob gone" the same way.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + '_;

  /// Replace the whole collection with `submissions`.
  fn save<'a>(
    &'a self,
    submissions: &'a [Submission],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
