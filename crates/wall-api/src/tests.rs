//! Router tests against an in-memory SQLite backend.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;
use wall_core::session::FixedSession;
use wall_store_sqlite::SqliteStore;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  viewer: Option<Uuid>,
  body: Option<Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header(header::CONTENT_TYPE, "application/json");
  }
  let mut req = builder
    .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
    .unwrap();
  if let Some(id) = viewer {
    req.extensions_mut().insert(FixedSession::viewer(id));
  }
  app.clone().oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

// ── Reads ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_read_is_401() {
  let app = app().await;
  let resp = send(&app, "GET", &format!("/walls/{}/items", Uuid::new_v4()), None, None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn nil_subject_is_400() {
  let app = app().await;
  let resp = send(
    &app,
    "GET",
    &format!("/walls/{}/count", Uuid::nil()),
    Some(Uuid::new_v4()),
    None,
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wall_without_privacy_record_is_empty() {
  let app = app().await;
  let me = Uuid::new_v4();
  let resp = send(&app, "GET", &format!("/walls/{me}/items"), Some(me), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!([]));
}

// ── End to end ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn event_and_status_flow_to_friend_wall() {
  let app = app().await;
  let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

  let resp = send(&app, "POST", "/connections", Some(alice), Some(json!({ "person_id": bob }))).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(
    &app,
    "PUT",
    "/privacy",
    Some(bob),
    Some(json!({ "wall": "only_friends", "status": "only_friends" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(&app, "POST", "/events", Some(alice), Some(json!({ "text": "profile.updated" }))).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(json_body(resp).await, json!({ "delivered": 1 }));

  let resp = send(&app, "PUT", "/status", Some(alice), Some(json!({ "message": "hello" }))).await;
  assert_eq!(resp.status(), StatusCode::OK);

  // Alice is Bob's friend, so she can read his wall.
  let resp = send(&app, "GET", &format!("/walls/{bob}/items"), Some(alice), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().contains_key(header::ETAG));
  let items = json_body(resp).await;
  let items = items.as_array().unwrap();
  assert_eq!(items.len(), 2);
  assert_eq!(items[0]["kind"], "status");
  assert_eq!(items[0]["text"], "hello");
  assert_eq!(items[1]["kind"], "event");

  let resp = send(&app, "GET", &format!("/walls/{bob}/count"), Some(alice), None).await;
  assert_eq!(json_body(resp).await, json!({ "count": 2 }));

  // A stranger is shut out of a friends-only wall.
  let stranger = Uuid::new_v4();
  let resp = send(&app, "GET", &format!("/walls/{bob}/count"), Some(stranger), None).await;
  assert_eq!(json_body(resp).await, json!({ "count": 0 }));
}

#[tokio::test]
async fn unchanged_wall_returns_304() {
  let app = app().await;
  let me = Uuid::new_v4();
  send(&app, "PUT", "/privacy", Some(me), Some(json!({}))).await;

  let first = send(&app, "GET", &format!("/walls/{me}/items"), Some(me), None).await;
  let etag = first.headers().get(header::ETAG).unwrap().to_str().unwrap().to_string();

  let req = Request::builder()
    .uri(format!("/walls/{me}/items"))
    .header(header::IF_NONE_MATCH, etag.as_str())
    .extension(FixedSession::viewer(me))
    .body(Body::empty())
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
}

// ── Writes ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_writes_are_401() {
  let app = app().await;
  let resp = send(&app, "POST", "/events", None, Some(json!({ "text": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let resp = send(&app, "PUT", "/status", None, Some(json!({ "message": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn nil_viewer_is_treated_as_anonymous() {
  let app = app().await;
  let nil = Some(Uuid::nil());

  let resp = send(&app, "POST", "/events", nil, Some(json!({ "text": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let resp = send(&app, "PUT", "/status", nil, Some(json!({ "message": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let resp = send(&app, "PUT", "/privacy", nil, Some(json!({}))).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let resp = send(
    &app,
    "POST",
    "/connections",
    nil,
    Some(json!({ "person_id": Uuid::new_v4() })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let resp = send(&app, "GET", &format!("/walls/{}/items", Uuid::new_v4()), nil, None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_event_text_is_400() {
  let app = app().await;
  let resp = send(&app, "POST", "/events", Some(Uuid::new_v4()), Some(json!({ "text": "  " }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn self_connection_is_400() {
  let app = app().await;
  let me = Uuid::new_v4();
  let resp = send(&app, "POST", "/connections", Some(me), Some(json!({ "person_id": me }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
