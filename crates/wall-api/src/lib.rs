//! JSON REST API for the wall.
//!
//! Exposes an axum [`Router`] backed by any [`Backend`]. Authentication is
//! the caller's responsibility: an outer layer resolves the viewer and inserts
//! a [`FixedSession`] into the request extensions. Requests without one are
//! treated as anonymous.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", wall_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod etag;
pub mod events;
pub mod profile;
pub mod walls;

use std::{convert::Infallible, sync::Arc};

use axum::{
  Router,
  extract::FromRequestParts,
  http::request::Parts,
  routing::{get, post, put},
};
use uuid::Uuid;
use wall_core::{
  privacy::PrivacyRules,
  session::{FixedSession, SessionContext as _},
  store::{ConnectionGraph, ProfileStore, StatusStore, WallStore},
  wall::WallAggregator,
};

pub use error::ApiError;

// ─── Backend ──────────────────────────────────────────────────────────────────

/// Everything the API needs from a storage backend.
pub trait Backend:
  WallStore + ConnectionGraph + StatusStore + PrivacyRules + ProfileStore + 'static
{
}

impl<T> Backend for T where
  T: WallStore + ConnectionGraph + StatusStore + PrivacyRules + ProfileStore + 'static
{
}

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<B> {
  pub wall:  WallAggregator<B, B, B, B>,
  pub store: Arc<B>,
}

impl<B> Clone for ApiState<B> {
  fn clone(&self) -> Self {
    Self {
      wall:  self.wall.clone(),
      store: Arc::clone(&self.store),
    }
  }
}

impl<B: Backend> ApiState<B> {
  /// Wire one backend in as all four wall collaborators.
  pub fn new(store: Arc<B>) -> Self {
    let wall = WallAggregator::new(
      Arc::clone(&store),
      Arc::clone(&store),
      Arc::clone(&store),
      Arc::clone(&store),
    );
    Self { wall, store }
  }
}

// ─── Session extractor ────────────────────────────────────────────────────────

/// The session resolved by the outer auth layer, or an anonymous one.
pub struct Session(pub FixedSession);

impl Session {
  /// The acting person for a write. The nil id never names anyone, so it is
  /// refused the same way as an anonymous session.
  pub fn viewer(&self) -> Result<Uuid, ApiError> {
    self
      .0
      .current_viewer()
      .filter(|viewer| !viewer.is_nil())
      .ok_or_else(|| ApiError::Unauthorized("login required".into()))
  }
}

impl<St: Send + Sync> FromRequestParts<St> for Session {
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &St,
  ) -> Result<Self, Self::Rejection> {
    Ok(Session(
      parts.extensions.get::<FixedSession>().copied().unwrap_or_default(),
    ))
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<B: Backend>(store: Arc<B>) -> Router<()> {
  Router::new()
    // Walls
    .route("/walls/{id}/items", get(walls::items::<B>))
    .route("/walls/{id}/count", get(walls::count::<B>))
    // Writes as the viewer
    .route("/events", post(events::create::<B>))
    .route("/connections", post(profile::connect::<B>))
    .route("/status", put(profile::set_status::<B>))
    .route("/privacy", put(profile::set_privacy::<B>))
    .with_state(ApiState::new(store))
}

#[cfg(test)]
mod tests;
