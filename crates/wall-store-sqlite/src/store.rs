//! [`SqliteStore`]: the SQLite implementation of the wall's collaborators.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use wall_core::{
  item::{Status, WallItem},
  person::Person,
  privacy::{PrivacyRules, PrivacySettings},
  store::{ConnectionGraph, ProfileStore, StatusStore, WallStore},
};

use crate::{
  Error, Result,
  encode::{
    RawPrivacy, RawStatus, RawWallItem, decode_uuid, encode_dt, encode_kind,
    encode_level, encode_uuid,
  },
  schema::SCHEMA,
};

/// How many persisted items [`WallStore::items_of`] returns unless
/// configured otherwise.
pub const DEFAULT_ITEM_LIMIT: usize = 30;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A wall backend stored in a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  item_limit: usize,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, item_limit: DEFAULT_ITEM_LIMIT };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened wall store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, item_limit: DEFAULT_ITEM_LIMIT };
    store.init_schema().await?;
    Ok(store)
  }

  /// Cap the number of persisted items returned per wall.
  pub fn with_item_limit(mut self, item_limit: usize) -> Self {
    self.item_limit = item_limit;
    self
  }

  pub fn item_limit(&self) -> usize { self.item_limit }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// The two members of a connection in stored order.
fn canonical_pair(a: Uuid, b: Uuid) -> (String, String) {
  let (a, b) = (encode_uuid(a), encode_uuid(b));
  if a < b { (a, b) } else { (b, a) }
}

// ─── WallStore ───────────────────────────────────────────────────────────────

impl WallStore for SqliteStore {
  type Error = Error;

  async fn append(&self, recipient: Uuid, item: &WallItem) -> Result<()> {
    let item_id_str   = encode_uuid(Uuid::new_v4());
    let recipient_str = encode_uuid(recipient);
    let creator_str   = encode_uuid(item.creator_id);
    let kind_str      = encode_kind(item.kind).to_owned();
    let at_str        = encode_dt(item.timestamp);
    let text          = item.text.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO wall_items (item_id, recipient_id, creator_id, kind, timestamp, text)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![item_id_str, recipient_str, creator_str, kind_str, at_str, text],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn items_of(&self, owner: Uuid) -> Result<Vec<WallItem>> {
    let owner_str = encode_uuid(owner);
    let limit     = i64::try_from(self.item_limit).unwrap_or(i64::MAX);

    let raws: Vec<RawWallItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT creator_id, kind, timestamp, text
           FROM wall_items
           WHERE recipient_id = ?1
           ORDER BY timestamp DESC, rowid ASC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str, limit], |row| {
            Ok(RawWallItem {
              creator_id: row.get(0)?,
              kind:       row.get(1)?,
              timestamp:  row.get(2)?,
              text:       row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWallItem::into_item).collect()
  }
}

// ─── ConnectionGraph ─────────────────────────────────────────────────────────

impl ConnectionGraph for SqliteStore {
  type Error = Error;

  async fn connections_of(&self, person: Uuid) -> Result<Vec<Person>> {
    let person_str = encode_uuid(person);

    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT other FROM (
             SELECT person_b AS other, connected_at FROM connections WHERE person_a = ?1
             UNION ALL
             SELECT person_a AS other, connected_at FROM connections WHERE person_b = ?1
           )
           ORDER BY connected_at, other",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    ids
      .iter()
      .map(|id| decode_uuid(id).map(Person::new))
      .collect()
  }

  async fn are_friends(&self, a: Uuid, b: Uuid) -> Result<bool> {
    let (a_str, b_str) = canonical_pair(a, b);

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM connections WHERE person_a = ?1 AND person_b = ?2",
              rusqlite::params![a_str, b_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }
}

// ─── StatusStore ─────────────────────────────────────────────────────────────

impl StatusStore for SqliteStore {
  type Error = Error;

  async fn current_status(&self, person: Uuid) -> Result<Option<Status>> {
    let person_str = encode_uuid(person);

    let raw: Option<RawStatus> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT message, timestamp FROM statuses WHERE person_id = ?1",
              rusqlite::params![person_str],
              |row| {
                Ok(RawStatus {
                  message:   row.get(0)?,
                  timestamp: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStatus::into_status).transpose()
  }
}

// ─── PrivacyRules ────────────────────────────────────────────────────────────

impl PrivacyRules for SqliteStore {
  type Error = Error;

  async fn privacy_of(&self, subject: Uuid) -> Result<Option<PrivacySettings>> {
    let subject_str = encode_uuid(subject);

    let raw: Option<RawPrivacy> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT person_id, wall, status FROM privacy WHERE person_id = ?1",
              rusqlite::params![subject_str],
              |row| {
                Ok(RawPrivacy {
                  person_id: row.get(0)?,
                  wall:      row.get(1)?,
                  status:    row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPrivacy::into_settings).transpose()
  }
}

// ─── ProfileStore ────────────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn connect(&self, a: Uuid, b: Uuid) -> Result<()> {
    if a == b {
      return Err(Error::SelfConnection(a));
    }
    let (a_str, b_str) = canonical_pair(a, b);
    let at_str         = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO connections (person_a, person_b, connected_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![a_str, b_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn set_status(&self, person: Uuid, message: String) -> Result<Status> {
    let status = Status { message, timestamp: Utc::now() };

    let person_str = encode_uuid(person);
    let message    = status.message.clone();
    let at_str     = encode_dt(status.timestamp);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO statuses (person_id, message, timestamp) VALUES (?1, ?2, ?3)
           ON CONFLICT (person_id) DO UPDATE
             SET message = excluded.message, timestamp = excluded.timestamp",
          rusqlite::params![person_str, message, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(status)
  }

  async fn set_privacy(&self, settings: PrivacySettings) -> Result<()> {
    let person_str = encode_uuid(settings.subject_id);
    let wall_str   = encode_level(settings.wall).to_owned();
    let status_str = encode_level(settings.status).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO privacy (person_id, wall, status) VALUES (?1, ?2, ?3)
           ON CONFLICT (person_id) DO UPDATE
             SET wall = excluded.wall, status = excluded.status",
          rusqlite::params![person_str, wall_str, status_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
