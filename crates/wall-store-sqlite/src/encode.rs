//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 with a fixed nanosecond width so that string order
//! matches chronological order. UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;
use wall_core::{
  item::{Status, WallItem, WallItemKind},
  privacy::{PrivacyLevel, PrivacySettings},
};

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── WallItemKind ─────────────────────────────────────────────────────────────

pub fn encode_kind(k: WallItemKind) -> &'static str {
  match k {
    WallItemKind::Event => "event",
    WallItemKind::Status => "status",
  }
}

pub fn decode_kind(s: &str) -> Result<WallItemKind> {
  match s {
    "event" => Ok(WallItemKind::Event),
    "status" => Ok(WallItemKind::Status),
    other => Err(Error::UnknownKind(other.to_owned())),
  }
}

// ─── PrivacyLevel ─────────────────────────────────────────────────────────────

pub fn encode_level(l: PrivacyLevel) -> &'static str {
  match l {
    PrivacyLevel::Everyone => "everyone",
    PrivacyLevel::OnlyFriends => "only_friends",
    PrivacyLevel::OnlyMe => "only_me",
  }
}

pub fn decode_level(s: &str) -> Result<PrivacyLevel> {
  match s {
    "everyone" => Ok(PrivacyLevel::Everyone),
    "only_friends" => Ok(PrivacyLevel::OnlyFriends),
    "only_me" => Ok(PrivacyLevel::OnlyMe),
    other => Err(Error::UnknownPrivacyLevel(other.to_owned())),
  }
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

/// A `wall_items` row as read from SQLite, before decoding.
pub struct RawWallItem {
  pub creator_id: String,
  pub kind:       String,
  pub timestamp:  String,
  pub text:       String,
}

impl RawWallItem {
  pub fn into_item(self) -> Result<WallItem> {
    Ok(WallItem {
      creator_id: decode_uuid(&self.creator_id)?,
      kind:       decode_kind(&self.kind)?,
      timestamp:  decode_dt(&self.timestamp)?,
      text:       self.text,
    })
  }
}

/// A `statuses` row.
pub struct RawStatus {
  pub message:   String,
  pub timestamp: String,
}

impl RawStatus {
  pub fn into_status(self) -> Result<Status> {
    Ok(Status {
      message:   self.message,
      timestamp: decode_dt(&self.timestamp)?,
    })
  }
}

/// A `privacy` row.
pub struct RawPrivacy {
  pub person_id: String,
  pub wall:      String,
  pub status:    String,
}

impl RawPrivacy {
  pub fn into_settings(self) -> Result<PrivacySettings> {
    Ok(PrivacySettings {
      subject_id: decode_uuid(&self.person_id)?,
      wall:       decode_level(&self.wall)?,
      status:     decode_level(&self.status)?,
    })
  }
}
