//! Wall items: the entries that make up a feed.
//!
//! An item has one of two origins. Events are posted explicitly and persisted
//! once per recipient. Status items are derived on read from a connection's
//! current status and are never stored.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Where a [`WallItem`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallItemKind {
  /// Explicitly posted and persisted in the recipient's wall store.
  Event,
  /// Synthesised per read from a connection's current status.
  Status,
}

impl WallItemKind {
  /// Tie-break rank when two items share a timestamp. Lower sorts first.
  pub fn rank(self) -> u8 {
    match self {
      Self::Event => 0,
      Self::Status => 1,
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// A person's current status message. Only the latest one matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
  pub message:   String,
  pub timestamp: DateTime<Utc>,
}

// ─── WallItem ────────────────────────────────────────────────────────────────

/// One feed entry. Immutable once constructed; it has no identity beyond its
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallItem {
  /// The person who caused the item: the event poster or the status owner.
  pub creator_id: Uuid,
  pub kind:       WallItemKind,
  pub timestamp:  DateTime<Utc>,
  /// Event key or status message. Events carry a key that the UI maps to a
  /// localised string.
  pub text:       String,
}

impl WallItem {
  /// An explicitly posted event.
  pub fn event(
    creator_id: Uuid,
    text: impl Into<String>,
    timestamp: DateTime<Utc>,
  ) -> Self {
    Self {
      creator_id,
      kind: WallItemKind::Event,
      timestamp,
      text: text.into(),
    }
  }

  /// A derived item for `owner`'s current status. Creator and timestamp come
  /// from the status, never from whoever is viewing.
  pub fn from_status(owner: Uuid, status: &Status) -> Self {
    Self {
      creator_id: owner,
      kind:       WallItemKind::Status,
      timestamp:  status.timestamp,
      text:       status.message.clone(),
    }
  }
}

/// Feed order: most recent first, events before statuses on equal
/// timestamps. Use with a stable sort so remaining ties keep discovery order.
pub fn newest_first(a: &WallItem, b: &WallItem) -> Ordering {
  b.timestamp
    .cmp(&a.timestamp)
    .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
}
