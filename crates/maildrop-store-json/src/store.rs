//! [`JsonStore`] and [`MemoryStore`] — the two `SubmissionStore` backends.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use maildrop_core::{store::SubmissionStore, submission::Submission};
use tokio::fs;

use crate::{Error, Result, decode::decode_collection};

// ─── File-backed store ───────────────────────────────────────────────────────

/// A submission store backed by a single JSON file.
///
/// Cloning is cheap — clones share the same path and therefore the same
/// blob.
#[derive(Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  /// Point the store at `path`. The file is created on first save; a
  /// missing file reads as an empty collection.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn io_err(&self, source: std::io::Error) -> Error {
    Error::Io { path: self.path.clone(), source }
  }
}

impl SubmissionStore for JsonStore {
  type Error = Error;

  async fn load(&self) -> Result<Vec<Submission>> {
    let blob = match fs::read_to_string(&self.path).await {
      Ok(blob) => blob,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Vec::new());
      }
      Err(e) => return Err(self.io_err(e)),
    };
    Ok(decode_collection(&blob))
  }

  async fn save(&self, submissions: &[Submission]) -> Result<()> {
    let blob = serde_json::to_string_pretty(submissions)?;

    // Write through a sibling temp file and rename, so a crash mid-write
    // cannot leave a half-written blob behind.
    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, blob.as_bytes())
      .await
      .map_err(|e| self.io_err(e))?;
    fs::rename(&tmp, &self.path)
      .await
      .map_err(|e| self.io_err(e))?;
    Ok(())
  }
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// In-memory fake for tests. Clones share the same collection.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Vec<Submission>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed the store with an existing collection.
  pub fn with(submissions: Vec<Submission>) -> Self {
    Self { inner: Arc::new(Mutex::new(submissions)) }
  }

  /// Snapshot of what is currently "persisted".
  pub fn snapshot(&self) -> Vec<Submission> {
    self.inner.lock().expect("store mutex poisoned").clone()
  }
}

impl SubmissionStore for MemoryStore {
  type Error = std::convert::Infallible;

  async fn load(&self) -> Result<Vec<Submission>, Self::Error> {
    Ok(self.snapshot())
  }

  async fn save(&self, submissions: &[Submission]) -> Result<(), Self::Error> {
    *self.inner.lock().expect("store mutex poisoned") = submissions.to_vec();
    Ok(())
  }
}
