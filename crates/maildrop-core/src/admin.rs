//! The Submission Reader/Manager — the password-gated admin panel.
//!
//! The panel is a two-state machine (`Locked`/`Unlocked`) wrapped around the
//! loaded collection and the active detail selection. Every operation except
//! `login` requires `Unlocked`. Unlocking loads the collection fresh from
//! the store; `export` deliberately does not reload, so it reflects only
//! what this session has loaded and mutated.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  credentials::CredentialCheck,
  export::{self, ExportFile},
  mailto,
  store::SubmissionStore,
  submission::{ListQuery, Status, Submission},
};

// ─── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
  Locked,
  Unlocked,
}

// ─── Panel ───────────────────────────────────────────────────────────────────

/// Gates access to the collection and mutates status/existence of entries.
///
/// The credential check is injected: the default production check is a
/// plaintext equality match (a cosmetic gate, not a security boundary),
/// but nothing here depends on how `verify` decides.
pub struct AdminPanel<S> {
  store:       S,
  credentials: Box<dyn CredentialCheck>,
  session:     Session,
  submissions: Vec<Submission>,
  selected:    Option<Uuid>,
}

impl<S> AdminPanel<S>
where
  S: SubmissionStore,
{
  pub fn new(store: S, credentials: Box<dyn CredentialCheck>) -> Self {
    Self {
      store,
      credentials,
      session: Session::Locked,
      submissions: Vec::new(),
      selected: None,
    }
  }

  pub fn is_unlocked(&self) -> bool {
    self.session == Session::Unlocked
  }

  // ── Session transitions ───────────────────────────────────────────────

  /// `Locked → Unlocked` on a matching secret; loads the collection fresh
  /// from the store. A wrong secret is reported inline — no lockout, no
  /// attempt counting.
  pub async fn login(&mut self, secret: &str) -> Result<()> {
    if !self.credentials.verify(secret) {
      tracing::warn!("admin login rejected");
      return Err(Error::InvalidCredentials);
    }
    self.submissions = self.store.load().await.map_err(Error::store)?;
    self.session = Session::Unlocked;
    tracing::info!(loaded = self.submissions.len(), "admin panel unlocked");
    Ok(())
  }

  /// `Unlocked → Locked`; clears the selection and the loaded entries.
  pub fn logout(&mut self) {
    self.session = Session::Locked;
    self.selected = None;
    self.submissions.clear();
  }

  fn require_unlocked(&self) -> Result<()> {
    match self.session {
      Session::Unlocked => Ok(()),
      Session::Locked => Err(Error::Locked),
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The filtered subsequence of the collection, insertion order preserved.
  /// Pure read.
  pub fn list(&self, query: &ListQuery) -> Result<Vec<&Submission>> {
    self.require_unlocked()?;
    Ok(self.submissions.iter().filter(|s| query.matches(s)).collect())
  }

  /// `(matching, total)` lengths for the panel's "N of M" readout.
  pub fn counts(&self, query: &ListQuery) -> Result<(usize, usize)> {
    self.require_unlocked()?;
    let matching = self.submissions.iter().filter(|s| query.matches(s)).count();
    Ok((matching, self.submissions.len()))
  }

  /// The active detail view, if any.
  pub fn selected(&self) -> Option<&Submission> {
    let id = self.selected?;
    self.submissions.iter().find(|s| s.id == id)
  }

  // ── Side-effecting read ───────────────────────────────────────────────

  /// Open the detail view for `id`.
  ///
  /// This is a side-effecting read: viewing a `New` entry transitions it to
  /// `Read` and persists the collection. Calling `select` again on the same
  /// entry is idempotent.
  pub async fn select(&mut self, id: Uuid) -> Result<&Submission> {
    self.require_unlocked()?;
    let idx = self.index_of(id)?;
    self.selected = Some(id);

    if self.submissions[idx].status == Status::New {
      self.submissions[idx].status = self.submissions[idx].status.on_view();
      self.persist().await?;
    }
    Ok(&self.submissions[idx])
  }

  // ── Status transitions ────────────────────────────────────────────────

  /// Explicit mark-as-read. Never downgrades a `Replied` entry.
  pub async fn mark_read(&mut self, id: Uuid) -> Result<&Submission> {
    self.transition(id, Status::on_mark_read).await
  }

  /// Explicit mark-as-replied — terminal, idempotent.
  pub async fn mark_replied(&mut self, id: Uuid) -> Result<&Submission> {
    self.transition(id, Status::on_mark_replied).await
  }

  async fn transition(
    &mut self,
    id: Uuid,
    step: fn(Status) -> Status,
  ) -> Result<&Submission> {
    self.require_unlocked()?;
    let idx = self.index_of(id)?;
    let next = step(self.submissions[idx].status);
    if next != self.submissions[idx].status {
      self.submissions[idx].status = next;
      self.persist().await?;
    }
    Ok(&self.submissions[idx])
  }

  // ── Deletion ──────────────────────────────────────────────────────────

  /// Remove the entry with `id` and persist the reduced collection. Clears
  /// the selection if it pointed at the deleted entry. Valid from any
  /// status.
  pub async fn delete(&mut self, id: Uuid) -> Result<()> {
    self.require_unlocked()?;
    let idx = self.index_of(id)?;
    self.submissions.remove(idx);
    if self.selected == Some(id) {
      self.selected = None;
    }
    self.persist().await?;
    tracing::info!(%id, remaining = self.submissions.len(), "submission deleted");
    Ok(())
  }

  // ── Export and reply ──────────────────────────────────────────────────

  /// Serialize the in-memory collection to a dated download.
  ///
  /// Does not reload from the store first, so it reflects only what this
  /// session has loaded and mutated — a potential staleness source when
  /// another writer has run since `login`.
  pub fn export(&self) -> Result<ExportFile> {
    self.require_unlocked()?;
    export::render(&self.submissions, Utc::now().date_naive())
  }

  /// `mailto:` reply link for the entry with `id`.
  pub fn reply_link(&self, id: Uuid) -> Result<String> {
    self.require_unlocked()?;
    let idx = self.index_of(id)?;
    Ok(mailto::reply_link(&self.submissions[idx]))
  }

  // ── Internals ─────────────────────────────────────────────────────────

  fn index_of(&self, id: Uuid) -> Result<usize> {
    self
      .submissions
      .iter()
      .position(|s| s.id == id)
      .ok_or(Error::SubmissionNotFound(id))
  }

  async fn persist(&self) -> Result<()> {
    self.store.save(&self.submissions).await.map_err(Error::store)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
