//! Lenient decoding of the persisted blob.
//!
//! The stored schema has no version field, and blobs written by earlier
//! revisions may lack `id` and `status` (or carry a timestamp-derived string
//! id that is not a UUID). Those records are migrated on read: a fresh v4 id
//! and a `new` status. A blob that does not parse at all is treated as an
//! empty collection — never a crash.

use chrono::{DateTime, Utc};
use maildrop_core::submission::{Status, Submission};
use serde::Deserialize;
use uuid::Uuid;

/// A record as it may appear on disk, before migration.
#[derive(Debug, Deserialize)]
struct RawSubmission {
  #[serde(default)]
  id:        Option<String>,
  name:      String,
  email:     String,
  subject:   String,
  message:   String,
  timestamp: DateTime<Utc>,
  #[serde(default)]
  status:    Option<Status>,
  #[serde(default)]
  to:        String,
}

impl RawSubmission {
  fn migrate(self) -> Submission {
    // Legacy ids were decimal timestamp strings; anything that is not a
    // UUID gets a fresh one.
    let id = self
      .id
      .as_deref()
      .and_then(|s| Uuid::parse_str(s).ok())
      .unwrap_or_else(Uuid::new_v4);

    Submission {
      id,
      name: self.name,
      email: self.email,
      subject: self.subject,
      message: self.message,
      timestamp: self.timestamp,
      status: self.status.unwrap_or(Status::New),
      to: self.to,
    }
  }
}

/// Decode a blob into a collection, migrating legacy records. Returns an
/// empty collection when the blob is not parseable.
pub fn decode_collection(blob: &str) -> Vec<Submission> {
  match serde_json::from_str::<Vec<RawSubmission>>(blob) {
    Ok(raw) => raw.into_iter().map(RawSubmission::migrate).collect(),
    Err(e) => {
      tracing::warn!(error = %e, "stored collection is not parseable; treating as empty");
      Vec::new()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn migrates_legacy_records() {
    // A record written by the old form: string timestamp id, no status.
    let blob = r#"[{
      "id": "1712345678901",
      "name": "Ana",
      "email": "ana@x.com",
      "subject": "Hi",
      "message": "Hello",
      "timestamp": "2026-08-30T12:00:00Z"
    }]"#;

    let decoded = decode_collection(blob);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].status, Status::New);
    assert_eq!(decoded[0].to, "");
    // The non-UUID id was replaced, not kept.
    assert_ne!(decoded[0].id.to_string(), "1712345678901");
  }

  #[test]
  fn keeps_valid_uuids_and_statuses() {
    let id = Uuid::new_v4();
    let blob = format!(
      r#"[{{
        "id": "{id}",
        "name": "Ana",
        "email": "ana@x.com",
        "subject": "Hi",
        "message": "Hello",
        "timestamp": "2026-08-30T12:00:00Z",
        "status": "replied",
        "to": "inbox@example.com"
      }}]"#
    );

    let decoded = decode_collection(&blob);
    assert_eq!(decoded[0].id, id);
    assert_eq!(decoded[0].status, Status::Replied);
  }

  #[test]
  fn garbage_blob_is_an_empty_collection() {
    assert!(decode_collection("not json at all").is_empty());
    assert!(decode_collection("{\"wrong\": \"shape\"}").is_empty());
  }
}
