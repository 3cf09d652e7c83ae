//! Handlers for the viewer's own connections, status and privacy.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/connections` | Body: `{"person_id":"..."}`; 204 |
//! | `PUT`  | `/status` | Body: `{"message":"..."}`; returns the stored status |
//! | `PUT`  | `/privacy` | Body: `{"wall":"...","status":"..."}`; 204 |

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use uuid::Uuid;
use wall_core::{
  item::Status,
  privacy::{PrivacyLevel, PrivacySettings},
};

use crate::{ApiState, Backend, Session, error::ApiError};

// ─── Connections ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConnectBody {
  pub person_id: Uuid,
}

/// `POST /connections`: connect the viewer to `person_id`.
pub async fn connect<B: Backend>(
  State(state): State<ApiState<B>>,
  session: Session,
  Json(body): Json<ConnectBody>,
) -> Result<StatusCode, ApiError> {
  let me = session.viewer()?;
  if body.person_id.is_nil() || body.person_id == me {
    return Err(ApiError::BadRequest("cannot connect to that person".into()));
  }
  state
    .store
    .connect(me, body.person_id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub message: String,
}

/// `PUT /status`: replace the viewer's current status.
pub async fn set_status<B: Backend>(
  State(state): State<ApiState<B>>,
  session: Session,
  Json(body): Json<StatusBody>,
) -> Result<Json<Status>, ApiError> {
  let me = session.viewer()?;
  let status = state
    .store
    .set_status(me, body.message)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(status))
}

// ─── Privacy ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PrivacyBody {
  #[serde(default)]
  pub wall:   PrivacyLevel,
  #[serde(default)]
  pub status: PrivacyLevel,
}

/// `PUT /privacy`: replace the viewer's privacy record.
pub async fn set_privacy<B: Backend>(
  State(state): State<ApiState<B>>,
  session: Session,
  Json(body): Json<PrivacyBody>,
) -> Result<StatusCode, ApiError> {
  let me = session.viewer()?;
  state
    .store
    .set_privacy(PrivacySettings {
      subject_id: me,
      wall:       body.wall,
      status:     body.status,
    })
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
