//! Export rendering and re-import.
//!
//! The admin panel serializes its in-memory collection to a downloadable
//! JSON file named after the current date. Parsing is the exact inverse, so
//! an exported file re-imports to an equivalent collection with ids and
//! statuses preserved.

use chrono::NaiveDate;

use crate::{Result, submission::Submission};

/// A rendered export: file name plus pretty-printed JSON contents.
#[derive(Debug, Clone)]
pub struct ExportFile {
  /// `submissions_<YYYY-MM-DD>.json`
  pub file_name: String,
  pub contents:  String,
}

/// Render `submissions` as a dated export file.
pub fn render(submissions: &[Submission], date: NaiveDate) -> Result<ExportFile> {
  Ok(ExportFile {
    file_name: format!("submissions_{}.json", date.format("%Y-%m-%d")),
    contents:  serde_json::to_string_pretty(submissions)?,
  })
}

/// Parse a previously exported file back into a collection.
pub fn parse(contents: &str) -> Result<Vec<Submission>> {
  Ok(serde_json::from_str(contents)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::submission::{Status, SubmissionDraft};

  #[test]
  fn file_name_carries_the_date() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
    let file = render(&[], date).unwrap();
    assert_eq!(file.file_name, "submissions_2026-08-31.json");
    assert_eq!(file.contents, "[]");
  }

  #[test]
  fn round_trip_preserves_ids_and_statuses() {
    let mut a = SubmissionDraft {
      name:    "Ana".into(),
      email:   "ana@x.com".into(),
      subject: "Hi".into(),
      message: "Hello".into(),
    }
    .into_submission("inbox@example.com");
    a.status = Status::Replied;
    let b = SubmissionDraft {
      name:    "Bo".into(),
      email:   "bo@x.com".into(),
      subject: "Budget".into(),
      message: "Numbers".into(),
    }
    .into_submission("inbox@example.com");

    let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
    let file = render(&[a.clone(), b.clone()], date).unwrap();
    let parsed = parse(&file.contents).unwrap();

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].id, a.id);
    assert_eq!(parsed[0].status, Status::Replied);
    assert_eq!(parsed[1].id, b.id);
    assert_eq!(parsed[1].subject, "Budget");
  }
}
