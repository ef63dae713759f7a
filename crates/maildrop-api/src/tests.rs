//! Router-level tests over the in-memory store.

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use maildrop_core::{
  admin::AdminPanel,
  credentials::StaticSecret,
  submission::{Status, Submission},
  writer::{SimulatedTransport, Writer},
};
use maildrop_store_json::MemoryStore;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt as _;

use crate::AppState;

fn app(store: MemoryStore) -> Router {
  let writer = Writer::new(
    store.clone(),
    SimulatedTransport::new(Duration::ZERO),
    "inbox@example.com",
  );
  let panel =
    AdminPanel::new(store, Box::new(StaticSecret::new("admin123")));
  crate::router(AppState {
    writer: Arc::new(writer),
    panel:  Arc::new(Mutex::new(panel)),
  })
}

fn post_json(path: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(path)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn get(path: &str) -> Request<Body> {
  Request::builder().uri(path).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn draft(name: &str, email: &str, subject: &str) -> Value {
  json!({ "name": name, "email": email, "subject": subject, "message": "Hello" })
}

async fn login(app: &Router) {
  let response = app
    .clone()
    .oneshot(post_json("/admin/login", json!({ "password": "admin123" })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ─── Contact form ────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_persists_one_new_entry() {
  let store = MemoryStore::new();
  let app = app(store.clone());

  let response = app
    .clone()
    .oneshot(post_json("/api/contact", draft("Ana", "ana@x.com", "Hi")))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);

  let stored: Submission =
    serde_json::from_value(body_json(response).await).unwrap();
  assert_eq!(stored.status, Status::New);
  assert_eq!(stored.to, "inbox@example.com");

  let snapshot = store.snapshot();
  assert_eq!(snapshot.len(), 1);
  assert_eq!(snapshot[0].id, stored.id);
}

#[tokio::test]
async fn submit_rejects_invalid_drafts() {
  let store = MemoryStore::new();
  let app = app(store.clone());

  let response = app
    .clone()
    .oneshot(post_json("/api/contact", draft("Ana", "no-at-sign", "Hi")))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);

  let response = app
    .clone()
    .oneshot(post_json("/api/contact", draft("", "ana@x.com", "Hi")))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);

  assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn mailto_composer_is_pure() {
  let store = MemoryStore::new();
  let app = app(store.clone());

  let response = app
    .clone()
    .oneshot(get(
      "/api/contact/mailto?name=Ana&email=ana%40x.com&subject=Hi&message=Hello",
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let body = body_json(response).await;
  let uri = body["mailto"].as_str().unwrap();
  assert!(uri.starts_with("mailto:inbox@example.com?subject="));

  // No side effect on the collection.
  assert!(store.snapshot().is_empty());
}

// ─── Admin gate ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_endpoints_are_locked_without_login() {
  let app = app(MemoryStore::new());

  let response = app
    .clone()
    .oneshot(get("/admin/submissions"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

  let response = app
    .clone()
    .oneshot(get("/admin/export"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected_inline() {
  let app = app(MemoryStore::new());

  let response = app
    .clone()
    .oneshot(post_json("/admin/login", json!({ "password": "letmein" })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_relocks_the_panel() {
  let app = app(MemoryStore::new());
  login(&app).await;

  let response = app
    .clone()
    .oneshot(get("/admin/submissions"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let response = app
    .clone()
    .oneshot(post_json("/admin/logout", json!({})))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NO_CONTENT);

  let response = app
    .clone()
    .oneshot(get("/admin/submissions"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ─── Review workflow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn full_review_workflow_over_http() {
  let store = MemoryStore::new();
  let app = app(store.clone());

  // Visitor submits.
  let response = app
    .clone()
    .oneshot(post_json("/api/contact", draft("Ana", "ana@x.com", "Hi")))
    .await
    .unwrap();
  let stored: Submission =
    serde_json::from_value(body_json(response).await).unwrap();

  login(&app).await;

  // Opening the detail view marks it read.
  let response = app
    .clone()
    .oneshot(get(&format!("/admin/submissions/{}", stored.id)))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let viewed: Submission =
    serde_json::from_value(body_json(response).await).unwrap();
  assert_eq!(viewed.status, Status::Read);
  assert_eq!(store.snapshot()[0].status, Status::Read);

  // Mark as replied.
  let response = app
    .clone()
    .oneshot(post_json(
      &format!("/admin/submissions/{}/replied", stored.id),
      json!({}),
    ))
    .await
    .unwrap();
  let replied: Submission =
    serde_json::from_value(body_json(response).await).unwrap();
  assert_eq!(replied.status, Status::Replied);

  // Reply link targets the visitor.
  let response = app
    .clone()
    .oneshot(get(&format!("/admin/submissions/{}/reply", stored.id)))
    .await
    .unwrap();
  let body = body_json(response).await;
  assert_eq!(
    body["mailto"].as_str().unwrap(),
    "mailto:ana@x.com?subject=Re%3A%20Hi"
  );

  // Delete; the collection is empty again.
  let response = app
    .clone()
    .oneshot(
      Request::builder()
        .method("DELETE")
        .uri(format!("/admin/submissions/{}", stored.id))
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NO_CONTENT);
  assert!(store.snapshot().is_empty());

  let response = app
    .clone()
    .oneshot(get(&format!("/admin/submissions/{}", stored.id)))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_search_and_status() {
  let store = MemoryStore::new();
  let app = app(store.clone());

  for (name, email, subject) in [
    ("Ana", "ana@x.com", "Budget"),
    ("Bo", "bo@x.com", "Hello"),
  ] {
    let response = app
      .clone()
      .oneshot(post_json("/api/contact", draft(name, email, subject)))
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
  }

  login(&app).await;

  let response = app
    .clone()
    .oneshot(get("/admin/submissions?search=bud"))
    .await
    .unwrap();
  let body = body_json(response).await;
  let listed = body.as_array().unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0]["subject"], "Budget");

  // Read "Budget"; only "Hello" stays new.
  let budget_id = listed[0]["id"].as_str().unwrap().to_owned();
  app
    .clone()
    .oneshot(get(&format!("/admin/submissions/{budget_id}")))
    .await
    .unwrap();

  let response = app
    .clone()
    .oneshot(get("/admin/submissions?status=new"))
    .await
    .unwrap();
  let body = body_json(response).await;
  let listed = body.as_array().unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0]["subject"], "Hello");
}

#[tokio::test]
async fn export_downloads_the_loaded_collection() {
  let store = MemoryStore::new();
  let app = app(store.clone());

  let response = app
    .clone()
    .oneshot(post_json("/api/contact", draft("Ana", "ana@x.com", "Hi")))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);

  login(&app).await;

  let response = app.clone().oneshot(get("/admin/export")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let disposition = response
    .headers()
    .get(header::CONTENT_DISPOSITION)
    .unwrap()
    .to_str()
    .unwrap()
    .to_owned();
  assert!(disposition.starts_with("attachment; filename=\"submissions_"));
  assert!(disposition.ends_with(".json\""));

  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let exported: Vec<Submission> = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(exported.len(), 1);
  assert_eq!(exported[0].subject, "Hi");
}
