//! Privacy settings and the [`PrivacyRules`] trait.
//!
//! Each person owns one privacy record with independent levels for their wall
//! and for the statuses shown on it. The aggregator only ever reads these.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Levels ──────────────────────────────────────────────────────────────────

/// Who may see a facet of a person's profile.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
  /// Any authenticated viewer.
  Everyone,
  /// Only people connected to the owner.
  #[default]
  OnlyFriends,
  /// Nobody but the owner.
  OnlyMe,
}

impl PrivacyLevel {
  /// Whether a non-owner is allowed through, given whether they are a friend.
  pub fn permits(self, friend: bool) -> bool {
    match self {
      Self::Everyone => true,
      Self::OnlyFriends => friend,
      Self::OnlyMe => false,
    }
  }
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// A subject's privacy record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
  pub subject_id: Uuid,
  /// Who may see the wall at all.
  pub wall:       PrivacyLevel,
  /// Which connections' statuses may be shown on the wall to other viewers.
  pub status:     PrivacyLevel,
}

impl PrivacySettings {
  /// A record with default levels for `subject_id`.
  pub fn new(subject_id: Uuid) -> Self {
    Self {
      subject_id,
      wall: PrivacyLevel::default(),
      status: PrivacyLevel::default(),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Lookup and evaluation of privacy records.
///
/// Only [`privacy_of`](PrivacyRules::privacy_of) touches a backend. The two
/// visibility checks are pure functions of the record and the friendship
/// flag; backends may override them.
pub trait PrivacyRules: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The privacy record for `subject`, or `None` if it has none.
  fn privacy_of(
    &self,
    subject: Uuid,
  ) -> impl Future<Output = Result<Option<PrivacySettings>, Self::Error>> + Send + '_;

  /// Whether `viewer` may see `subject`'s wall. `friend` is the
  /// subject–viewer friendship.
  fn wall_visible(
    &self,
    subject: Uuid,
    privacy: &PrivacySettings,
    viewer: Uuid,
    friend: bool,
  ) -> bool {
    subject == viewer || privacy.wall.permits(friend)
  }

  /// Whether `status_owner`'s status may be shown on `subject`'s wall.
  /// `friend` is the subject–owner friendship, not anything involving the
  /// viewer.
  fn status_visible(
    &self,
    _subject: Uuid,
    privacy: &PrivacySettings,
    _status_owner: Uuid,
    friend: bool,
  ) -> bool {
    privacy.status.permits(friend)
  }
}
