//! `mailto:` URI composition.
//!
//! Two user-agent hand-offs exist in the workflow: the public form's
//! fallback composer (bypasses persistence entirely) and the admin panel's
//! "reply via email" link. Both are pure functions of their inputs.

use crate::submission::{Submission, SubmissionDraft};

/// Build the fallback composer URI for a draft the user typed into the
/// public form. No side effect on the collection.
pub fn fallback_composer(to: &str, draft: &SubmissionDraft) -> String {
  let subject = format!("Portfolio Contact: {}", draft.subject);
  let body = format!(
    "Name: {}\nEmail: {}\n\nMessage:\n{}\n\n---\nSent from portfolio website",
    draft.name, draft.email, draft.message
  );
  format!(
    "mailto:{to}?subject={}&body={}",
    percent_encode(&subject),
    percent_encode(&body)
  )
}

/// Build the admin's reply link for a stored submission, addressed to the
/// visitor with a `Re:` subject.
pub fn reply_link(submission: &Submission) -> String {
  format!(
    "mailto:{}?subject={}",
    submission.email,
    percent_encode(&format!("Re: {}", submission.subject))
  )
}

/// Percent-encode everything outside RFC 3986 unreserved characters.
/// `mailto:` query values need no more than this.
fn percent_encode(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for byte in input.bytes() {
    match byte {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
        out.push(byte as char)
      }
      _ => out.push_str(&format!("%{byte:02X}")),
    }
  }
  out
}
