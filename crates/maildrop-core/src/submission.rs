//! Submission — one contact-form entry and its review status.
//!
//! A submission is created once by the [`Writer`](crate::writer::Writer) and
//! from then on only its `status` may change, and only through the admin
//! panel. The status machine is encoded here so every caller transitions the
//! same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Review state of a submission. `Replied` is terminal: once an entry has
/// been answered, no later mark moves it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  #[default]
  New,
  Read,
  Replied,
}

impl Status {
  /// Transition applied when the admin opens the detail view. Viewing is a
  /// side-effecting read: a `New` entry becomes `Read`; anything else is
  /// left alone.
  pub fn on_view(self) -> Status {
    match self {
      Status::New => Status::Read,
      other => other,
    }
  }

  /// Explicit "mark as read". Never downgrades a `Replied` entry.
  pub fn on_mark_read(self) -> Status {
    match self {
      Status::Replied => Status::Replied,
      _ => Status::Read,
    }
  }

  /// Explicit "mark as replied" — legal from any status, idempotent.
  pub fn on_mark_replied(self) -> Status {
    Status::Replied
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// One contact-form entry.
///
/// `id` and `timestamp` are assigned at creation and never change. `to` is
/// the fixed inbox address the message is logically addressed to —
/// configuration, not user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
  pub id:        Uuid,
  pub name:      String,
  pub email:     String,
  pub subject:   String,
  pub message:   String,
  pub timestamp: DateTime<Utc>,
  pub status:    Status,
  pub to:        String,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The four user-supplied fields of a submission before it is accepted.
/// Missing fields deserialize as empty and fail [`validate`](Self::validate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionDraft {
  pub name:    String,
  pub email:   String,
  pub subject: String,
  pub message: String,
}

impl SubmissionDraft {
  /// Boundary validation: name/subject/message must be non-empty and the
  /// email must contain at least one `@`. A minimal format check, not RFC
  /// validation — matching what the public form enforces.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("name", &self.name),
      ("subject", &self.subject),
      ("message", &self.message),
    ] {
      if value.trim().is_empty() {
        return Err(Error::EmptyField(field));
      }
    }
    if self.email.trim().is_empty() {
      return Err(Error::EmptyField("email"));
    }
    if !self.email.contains('@') {
      return Err(Error::InvalidEmail(self.email.clone()));
    }
    Ok(())
  }

  /// Build the persisted record: fresh v4 id, current instant, `New` status
  /// and the configured inbox address.
  pub fn into_submission(self, to: &str) -> Submission {
    Submission {
      id:        Uuid::new_v4(),
      name:      self.name,
      email:     self.email,
      subject:   self.subject,
      message:   self.message,
      timestamp: Utc::now(),
      status:    Status::New,
      to:        to.to_owned(),
    }
  }
}

// ─── List query ──────────────────────────────────────────────────────────────

/// Status filter for [`ListQuery`] — either everything or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
  #[default]
  All,
  New,
  Read,
  Replied,
}

impl StatusFilter {
  pub fn matches(self, status: Status) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::New => status == Status::New,
      StatusFilter::Read => status == Status::Read,
      StatusFilter::Replied => status == Status::Replied,
    }
  }
}

/// Parameters for [`AdminPanel::list`](crate::admin::AdminPanel::list).
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
  /// Case-insensitive substring matched against name, email and subject.
  /// Empty matches everything.
  pub search: String,
  pub status: StatusFilter,
}

impl ListQuery {
  pub fn matches(&self, submission: &Submission) -> bool {
    if !self.status.matches(submission.status) {
      return false;
    }
    if self.search.is_empty() {
      return true;
    }
    let needle = self.search.to_lowercase();
    [&submission.name, &submission.email, &submission.subject]
      .into_iter()
      .any(|field| field.to_lowercase().contains(&needle))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
