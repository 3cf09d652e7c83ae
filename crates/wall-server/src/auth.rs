//! HTTP Basic session resolution.
//!
//! Each configured account maps a username and argon2 password hash to the
//! person whose wall it acts as. A request without credentials continues as
//! anonymous; the wall itself decides whether that is allowed.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::HeaderMap,
  middleware::Next,
  response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use uuid::Uuid;
use wall_core::session::FixedSession;

use crate::{UserEntry, error::Error};

/// Accounts accepted by this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  pub users: Vec<UserEntry>,
}

/// Resolve the viewer from the `Authorization` header.
///
/// Returns `Ok(None)` when no header is present and [`Error::Unauthorized`]
/// when credentials are present but wrong.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Option<Uuid>, Error> {
  let Some(header_val) = headers.get(axum::http::header::AUTHORIZATION) else {
    return Ok(None);
  };
  let header_val = header_val.to_str().map_err(|_| Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let user = config
    .users
    .iter()
    .find(|u| u.username == username)
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(Some(user.person_id))
}

/// Middleware: attach a [`FixedSession`] for the resolved viewer.
pub async fn resolve_session(
  State(auth): State<Arc<AuthConfig>>,
  mut req: Request,
  next: Next,
) -> Response {
  match verify_auth(req.headers(), &auth) {
    Ok(viewer) => {
      req.extensions_mut().insert(FixedSession(viewer));
      next.run(req).await
    }
    Err(e) => {
      tracing::debug!("rejected credentials");
      e.into_response()
    }
  }
}
