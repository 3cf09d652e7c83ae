//! Handlers for `/walls` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/walls/{id}/items` | Feed as seen by the session viewer; `ETag` + `If-None-Match` |
//! | `GET`  | `/walls/{id}/count` | `{"count": n}`; always equals the feed's length |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  ApiState, Backend, Session,
  error::ApiError,
  etag::{compute_etag, is_fresh},
};

/// `GET /walls/{id}/items`
pub async fn items<B: Backend>(
  State(state): State<ApiState<B>>,
  Session(session): Session,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let items = state.wall.list_wall_items_for(&session, id).await?;
  let etag = compute_etag(&items);

  if is_fresh(&headers, &etag) {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }
  Ok(([(header::ETAG, etag)], Json(items)).into_response())
}

#[derive(Debug, Serialize)]
pub struct CountBody {
  pub count: usize,
}

/// `GET /walls/{id}/count`
pub async fn count<B: Backend>(
  State(state): State<ApiState<B>>,
  Session(session): Session,
  Path(id): Path<Uuid>,
) -> Result<Json<CountBody>, ApiError> {
  let count = state.wall.count_wall_items_for(&session, id).await?;
  Ok(Json(CountBody { count }))
}
