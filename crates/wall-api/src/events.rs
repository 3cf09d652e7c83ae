//! Handler for `POST /events`: post an event as the session viewer and fan
//! it out to their connections' walls.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, Backend, Session, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct EventBody {
  /// Event key, e.g. `"profile.image.changed"`.
  pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Delivered {
  /// How many walls received the event.
  pub delivered: usize,
}

/// `POST /events`: body: `{"text":"..."}`; returns 201 + [`Delivered`].
pub async fn create<B: Backend>(
  State(state): State<ApiState<B>>,
  session: Session,
  Json(body): Json<EventBody>,
) -> Result<impl IntoResponse, ApiError> {
  let creator = session.viewer()?;

  if body.text.trim().is_empty() {
    return Err(ApiError::BadRequest("event text must not be empty".into()));
  }

  let delivered = state.wall.post_event(&body.text, creator).await?;
  tracing::info!(%creator, delivered, "event posted");
  Ok((StatusCode::CREATED, Json(Delivered { delivered })))
}
