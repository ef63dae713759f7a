//! Handlers for the admin-panel endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/admin/login` | Body: `{"password":"..."}` |
//! | `POST`   | `/admin/logout` | Clears selection, locks the panel |
//! | `GET`    | `/admin/submissions` | Optional `?search=..&status=new\|read\|replied\|all` |
//! | `GET`    | `/admin/submissions/:id` | Side-effecting read: first view marks `read` |
//! | `DELETE` | `/admin/submissions/:id` | |
//! | `POST`   | `/admin/submissions/:id/read` | |
//! | `POST`   | `/admin/submissions/:id/replied` | Terminal |
//! | `GET`    | `/admin/submissions/:id/reply` | Reply `mailto:` link |
//! | `GET`    | `/admin/export` | Dated JSON download of the loaded collection |
//!
//! Everything except `login` answers 401 while the panel is locked.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use maildrop_core::{
  store::SubmissionStore,
  submission::{ListQuery, StatusFilter, Submission},
  writer::Transport,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Session ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub password: String,
}

/// `POST /admin/login` — body: `{"password":"..."}`
///
/// Unlocking loads the collection fresh from the store. A wrong password is
/// a plain 401; there is no lockout and no attempt counting.
pub async fn login<S, T>(
  State(state): State<AppState<S, T>>,
  Json(body): Json<LoginBody>,
) -> Result<StatusCode, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  state.panel.lock().await.login(&body.password).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/logout`
pub async fn logout<S, T>(State(state): State<AppState<S, T>>) -> StatusCode
where
  S: SubmissionStore,
  T: Transport,
{
  state.panel.lock().await.logout();
  StatusCode::NO_CONTENT
}

// ─── Collection reads ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Case-insensitive substring over name, email and subject.
  #[serde(default)]
  pub search: String,
  /// One status, or `all` (the default).
  #[serde(default)]
  pub status: StatusFilter,
}

/// `GET /admin/submissions[?search=..][&status=..]`
pub async fn list<S, T>(
  State(state): State<AppState<S, T>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Submission>>, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let query = ListQuery { search: params.search, status: params.status };
  let panel = state.panel.lock().await;
  let matching = panel.list(&query)?.into_iter().cloned().collect();
  Ok(Json(matching))
}

/// `GET /admin/submissions/:id` — the side-effecting read.
///
/// Opening a `new` entry transitions it to `read` and persists the
/// collection; callers must expect the status they get back to differ from
/// the one the list showed.
pub async fn select<S, T>(
  State(state): State<AppState<S, T>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let mut panel = state.panel.lock().await;
  let submission = panel.select(id).await?.clone();
  Ok(Json(submission))
}

// ─── Status transitions ───────────────────────────────────────────────────────

/// `POST /admin/submissions/:id/read`
pub async fn mark_read<S, T>(
  State(state): State<AppState<S, T>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let mut panel = state.panel.lock().await;
  let submission = panel.mark_read(id).await?.clone();
  Ok(Json(submission))
}

/// `POST /admin/submissions/:id/replied`
pub async fn mark_replied<S, T>(
  State(state): State<AppState<S, T>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let mut panel = state.panel.lock().await;
  let submission = panel.mark_replied(id).await?.clone();
  Ok(Json(submission))
}

// ─── Deletion ─────────────────────────────────────────────────────────────────

/// `DELETE /admin/submissions/:id`
pub async fn delete_one<S, T>(
  State(state): State<AppState<S, T>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  state.panel.lock().await.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Export and reply ─────────────────────────────────────────────────────────

/// `GET /admin/export` — the loaded collection as a dated JSON download.
pub async fn export<S, T>(
  State(state): State<AppState<S, T>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let file = state.panel.lock().await.export()?;
  let disposition = format!("attachment; filename=\"{}\"", file.file_name);
  Ok((
    [
      (header::CONTENT_TYPE, "application/json".to_owned()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    file.contents,
  ))
}

/// `GET /admin/submissions/:id/reply` — `mailto:` link addressed to the
/// visitor with a `Re:` subject.
pub async fn reply_link<S, T>(
  State(state): State<AppState<S, T>>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: SubmissionStore,
  T: Transport,
{
  let uri = state.panel.lock().await.reply_link(id)?;
  Ok(Json(json!({ "mailto": uri })))
}
