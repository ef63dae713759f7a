//! JSON HTTP API for the maildrop submission inbox.
//!
//! Exposes an axum [`Router`] backed by any
//! [`maildrop_core::store::SubmissionStore`]: the public contact-form
//! surface under `/api` and the admin panel under `/admin`. TLS and
//! transport concerns are the caller's responsibility.
//!
//! The admin panel is shared behind one async mutex — a single owning
//! process serializing every read-modify-write of the collection, which is
//! the strongest guarantee the blob-per-operation persistence model admits.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use maildrop_core::{admin::AdminPanel, store::SubmissionStore, writer::{Transport, Writer}};
use tokio::sync::Mutex;

pub use error::ApiError;

/// Shared state threaded through all axum handlers.
pub struct AppState<S, T> {
  pub writer: Arc<Writer<S, T>>,
  pub panel:  Arc<Mutex<AdminPanel<S>>>,
}

impl<S, T> Clone for AppState<S, T> {
  fn clone(&self) -> Self {
    Self { writer: self.writer.clone(), panel: self.panel.clone() }
  }
}

/// Build a fully-materialised router for one writer/panel pair.
pub fn router<S, T>(state: AppState<S, T>) -> Router
where
  S: SubmissionStore + 'static,
  T: Transport + 'static,
{
  Router::new()
    // Public contact form
    .route("/api/contact", post(handlers::contact::submit::<S, T>))
    .route("/api/contact/mailto", get(handlers::contact::mailto::<S, T>))
    // Admin session
    .route("/admin/login", post(handlers::admin::login::<S, T>))
    .route("/admin/logout", post(handlers::admin::logout::<S, T>))
    // Admin collection
    .route("/admin/submissions", get(handlers::admin::list::<S, T>))
    .route(
      "/admin/submissions/{id}",
      get(handlers::admin::select::<S, T>)
        .delete(handlers::admin::delete_one::<S, T>),
    )
    .route(
      "/admin/submissions/{id}/read",
      post(handlers::admin::mark_read::<S, T>),
    )
    .route(
      "/admin/submissions/{id}/replied",
      post(handlers::admin::mark_replied::<S, T>),
    )
    .route(
      "/admin/submissions/{id}/reply",
      get(handlers::admin::reply_link::<S, T>),
    )
    .route("/admin/export", get(handlers::admin::export::<S, T>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
