//! Handlers for the public contact-form endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/contact` | Body: [`SubmissionDraft`]; 201 + stored record |
//! | `GET`  | `/api/contact/mailto` | Pure fallback composer; no persistence |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use maildrop_core::{
  mailto, store::SubmissionStore, submission::SubmissionDraft, writer::Transport,
};
use serde_json::json;

use crate::{AppState, error::ApiError};

/// `POST /api/contact` — body: the four form fields.
///
/// On success the stored record comes back with a 201. A failed send after
/// the persist answers 502 with the direct-email fallback instruction; the
/// record is already in the collection by then.
pub async fn submit<S, T>(
  State(state): State<AppState<S, T>>,
  Json(draft): Json<SubmissionDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let submission = state.writer.submit(draft).await?;
  Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /api/contact/mailto?name=..&email=..&subject=..&message=..`
///
/// The fallback path that bypasses persistence entirely: a pre-filled
/// `mailto:` URI for the user's own mail client.
pub async fn mailto<S, T>(
  State(state): State<AppState<S, T>>,
  Query(draft): Query<SubmissionDraft>,
) -> Json<serde_json::Value>
where
  S: SubmissionStore,
  T: Transport,
{
  let uri = mailto::fallback_composer(state.writer.inbox_address(), &draft);
  Json(json!({ "mailto": uri }))
}
