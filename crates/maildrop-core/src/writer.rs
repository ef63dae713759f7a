//! The Submission Writer — the public contact-form side of the inbox.
//!
//! `submit` persists first and "sends" second. The send is a simulated
//! transport (there is no real backend), so a transport failure after the
//! persist leaves the record in the collection — an accepted, observable
//! inconsistency rather than something to roll back.

use std::future::Future;
use std::time::Duration;

use crate::{
  Error, Result,
  store::SubmissionStore,
  submission::{Submission, SubmissionDraft},
};

// ─── Transport ───────────────────────────────────────────────────────────────

/// The notification side channel for a freshly persisted submission.
pub trait Transport: Send + Sync {
  fn send<'a>(
    &'a self,
    submission: &'a Submission,
  ) -> impl Future<Output = Result<(), Error>> + Send + 'a;
}

/// Stand-in for a real mail API call: sleep for a configured latency, then
/// succeed. Production defaults to a 1.5 s delay; tests use zero.
pub struct SimulatedTransport {
  latency: Duration,
}

impl SimulatedTransport {
  pub fn new(latency: Duration) -> Self {
    Self { latency }
  }
}

impl Default for SimulatedTransport {
  fn default() -> Self {
    Self::new(Duration::from_millis(1500))
  }
}

impl Transport for SimulatedTransport {
  async fn send(&self, submission: &Submission) -> Result<()> {
    tokio::time::sleep(self.latency).await;
    tracing::info!(
      id = %submission.id,
      from = %submission.email,
      subject = %submission.subject,
      "simulated send complete"
    );
    Ok(())
  }
}

// ─── Writer ──────────────────────────────────────────────────────────────────

/// Captures one user inquiry and persists it.
pub struct Writer<S, T> {
  store:     S,
  transport: T,
  /// The fixed inbox address every submission is logically addressed to.
  to:        String,
}

impl<S, T> Writer<S, T>
where
  S: SubmissionStore,
  T: Transport,
{
  pub fn new(store: S, transport: T, to: impl Into<String>) -> Self {
    Self { store, transport, to: to.into() }
  }

  pub fn inbox_address(&self) -> &str {
    &self.to
  }

  /// Validate `draft`, append it to the collection, then run the simulated
  /// send.
  ///
  /// The collection grows by exactly one entry per successful call. A
  /// transport failure is surfaced as [`Error::Transport`] carrying the
  /// inbox address for the caller's fallback instruction; by then the
  /// record is already persisted.
  pub async fn submit(&self, draft: SubmissionDraft) -> Result<Submission> {
    draft.validate()?;
    let submission = draft.into_submission(&self.to);

    let mut collection = self.store.load().await.map_err(Error::store)?;
    collection.push(submission.clone());
    self.store.save(&collection).await.map_err(Error::store)?;
    tracing::debug!(id = %submission.id, total = collection.len(), "submission persisted");

    self.transport.send(&submission).await?;
    Ok(submission)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::submission::Status;

  /// Minimal in-memory store for exercising the writer in isolation.
  struct TestStore(Mutex<Vec<Submission>>);

  impl TestStore {
    fn new() -> Self {
      Self(Mutex::new(Vec::new()))
    }

    fn len(&self) -> usize {
      self.0.lock().unwrap().len()
    }
  }

  impl SubmissionStore for &TestStore {
    type Error = std::convert::Infallible;

    async fn load(&self) -> Result<Vec<Submission>, Self::Error> {
      Ok(self.0.lock().unwrap().clone())
    }

    async fn save(&self, submissions: &[Submission]) -> Result<(), Self::Error> {
      *self.0.lock().unwrap() = submissions.to_vec();
      Ok(())
    }
  }

  /// Transport that always rejects, for the persisted-but-unsent path.
  struct FailingTransport;

  impl Transport for FailingTransport {
    async fn send(&self, submission: &Submission) -> Result<()> {
      Err(Error::Transport { to: submission.to.clone() })
    }
  }

  fn draft() -> SubmissionDraft {
    SubmissionDraft {
      name:    "Ana".into(),
      email:   "ana@x.com".into(),
      subject: "Hi".into(),
      message: "Hello".into(),
    }
  }

  #[tokio::test]
  async fn submit_appends_exactly_one_new_entry() {
    let store = TestStore::new();
    let writer = Writer::new(
      &store,
      SimulatedTransport::new(Duration::ZERO),
      "inbox@example.com",
    );

    let stored = writer.submit(draft()).await.unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(stored.status, Status::New);
    assert_eq!(stored.to, "inbox@example.com");

    writer.submit(draft()).await.unwrap();
    assert_eq!(store.len(), 2);
  }

  #[tokio::test]
  async fn invalid_draft_is_rejected_before_persisting() {
    let store = TestStore::new();
    let writer = Writer::new(
      &store,
      SimulatedTransport::new(Duration::ZERO),
      "inbox@example.com",
    );

    let mut bad = draft();
    bad.email = "no-at-sign".into();
    assert!(matches!(
      writer.submit(bad).await,
      Err(Error::InvalidEmail(_))
    ));
    assert_eq!(store.len(), 0);
  }

  #[tokio::test]
  async fn transport_failure_still_persists_the_record() {
    let store = TestStore::new();
    let writer = Writer::new(&store, FailingTransport, "inbox@example.com");

    let result = writer.submit(draft()).await;
    assert!(matches!(
      result,
      Err(Error::Transport { ref to }) if to == "inbox@example.com"
    ));
    // The write is not rolled back.
    assert_eq!(store.len(), 1);
  }
}
