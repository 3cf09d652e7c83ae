//! Data collaborator traits: the wall store, the connection graph and the
//! status store, plus [`ProfileStore`] for the writes that feed them.
//!
//! Backends (e.g. `wall-store-sqlite`) implement these. The aggregator depends
//! only on the read traits. All methods return `Send` futures so
//! implementations can be shared across a multi-threaded runtime.

use std::future::Future;

use uuid::Uuid;

use crate::{
  item::{Status, WallItem},
  person::Person,
  privacy::PrivacySettings,
};

/// Durable per-recipient storage of posted wall items.
pub trait WallStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append `item` to `recipient`'s wall.
  fn append<'a>(
    &'a self,
    recipient: Uuid,
    item: &'a WallItem,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// The persisted items on `owner`'s wall. Implementations apply their own
  /// cap on how many are returned.
  fn items_of(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<WallItem>, Self::Error>> + Send + '_;
}

/// The symmetric friend relation between people.
pub trait ConnectionGraph: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Everyone connected to `person`. Empty if there is nobody.
  fn connections_of(
    &self,
    person: Uuid,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Whether `a` and `b` are connected.
  fn are_friends(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

/// Lookup of a person's current status.
pub trait StatusStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// `person`'s latest status, or `None` if they have never set one.
  fn current_status(
    &self,
    person: Uuid,
  ) -> impl Future<Output = Result<Option<Status>, Self::Error>> + Send + '_;
}

/// Writes to the connection graph, status store and privacy records.
///
/// The aggregator never calls these; they exist for whatever owns profile
/// editing (the HTTP API, imports, tests).
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Connect `a` and `b`. Connecting an existing pair is a no-op.
  fn connect(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace `person`'s current status; the store assigns the timestamp.
  fn set_status(
    &self,
    person: Uuid,
    message: String,
  ) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  /// Create or replace the privacy record for `settings.subject_id`.
  fn set_privacy(
    &self,
    settings: PrivacySettings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
