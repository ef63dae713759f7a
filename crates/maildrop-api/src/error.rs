//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The submission was persisted but the send failed. The response tells
  /// the caller to email the inbox address directly.
  #[error("send failed; email {to} directly")]
  SendFailed { to: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<maildrop_core::Error> for ApiError {
  fn from(e: maildrop_core::Error) -> Self {
    use maildrop_core::Error as E;
    match e {
      E::EmptyField(_) | E::InvalidEmail(_) => ApiError::BadRequest(e.to_string()),
      E::InvalidCredentials => ApiError::Unauthorized("invalid admin credentials".into()),
      E::Locked => ApiError::Unauthorized("admin panel is locked".into()),
      E::SubmissionNotFound(id) => {
        ApiError::NotFound(format!("submission {id} not found"))
      }
      E::Transport { to } => ApiError::SendFailed { to },
      E::Store(_) | E::Serialization(_) => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::SendFailed { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
