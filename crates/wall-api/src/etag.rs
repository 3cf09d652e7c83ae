//! ETag computation for assembled walls.
//!
//! The tag is a SHA-256 over every item in feed order, so any change to
//! content, visibility or ordering yields a new tag.

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};
use wall_core::item::WallItem;

/// Compute a quoted strong ETag for `items`.
pub fn compute_etag(items: &[WallItem]) -> String {
  let mut hasher = Sha256::new();
  for item in items {
    hasher.update(item.creator_id.as_bytes());
    hasher.update([item.kind.rank()]);
    hasher.update(item.timestamp.timestamp_micros().to_le_bytes());
    hasher.update((item.text.len() as u64).to_le_bytes());
    hasher.update(item.text.as_bytes());
  }
  format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Whether `If-None-Match` already names `etag`. Accepts bare (unquoted)
/// tags, `*`, and weak `W/` tags, which `If-None-Match` compares weakly.
pub fn is_fresh(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let bare = etag.trim_matches('"');
  value
    .split(',')
    .map(str::trim)
    .map(|tag| tag.strip_prefix("W/").unwrap_or(tag))
    .any(|tag| tag == "*" || tag.trim_matches('"') == bare)
}
