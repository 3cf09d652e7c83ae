//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;
use wall_core::{
  item::{WallItem, WallItemKind},
  privacy::{PrivacyLevel, PrivacyRules, PrivacySettings},
  session::FixedSession,
  store::{ConnectionGraph, ProfileStore, StatusStore, WallStore},
  wall::WallAggregator,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(n: i64) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap() + Duration::days(n)
}

// ─── Wall items ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_read_back_newest_first() {
  let s = store().await;
  let (owner, creator) = (Uuid::new_v4(), Uuid::new_v4());

  s.append(owner, &WallItem::event(creator, "first", day(1))).await.unwrap();
  s.append(owner, &WallItem::event(creator, "third", day(3))).await.unwrap();
  s.append(owner, &WallItem::event(creator, "second", day(2))).await.unwrap();

  let items = s.items_of(owner).await.unwrap();
  let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
  assert_eq!(texts, ["third", "second", "first"]);
  assert_eq!(items[0].creator_id, creator);
  assert_eq!(items[0].kind, WallItemKind::Event);
  assert_eq!(items[0].timestamp, day(3));
}

#[tokio::test]
async fn items_are_scoped_to_recipient() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
  s.append(a, &WallItem::event(b, "for a", day(1))).await.unwrap();

  assert_eq!(s.items_of(a).await.unwrap().len(), 1);
  assert!(s.items_of(b).await.unwrap().is_empty());
}

#[tokio::test]
async fn items_of_applies_item_limit() {
  let s = store().await.with_item_limit(3);
  let owner = Uuid::new_v4();
  for n in 0..5 {
    s.append(owner, &WallItem::event(owner, format!("e{n}"), day(n)))
      .await
      .unwrap();
  }

  let items = s.items_of(owner).await.unwrap();
  let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
  assert_eq!(texts, ["e4", "e3", "e2"]);
}

// ─── Connections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn connections_are_symmetric() {
  let s = store().await;
  let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
  s.connect(a, b).await.unwrap();
  s.connect(c, a).await.unwrap();

  let of_a: Vec<Uuid> = s
    .connections_of(a)
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.person_id)
    .collect();
  assert_eq!(of_a.len(), 2);
  assert!(of_a.contains(&b) && of_a.contains(&c));

  assert!(s.are_friends(a, b).await.unwrap());
  assert!(s.are_friends(b, a).await.unwrap());
  assert!(!s.are_friends(b, c).await.unwrap());
}

#[tokio::test]
async fn connecting_twice_is_a_no_op() {
  let s = store().await;
  let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
  s.connect(a, b).await.unwrap();
  s.connect(b, a).await.unwrap();

  assert_eq!(s.connections_of(a).await.unwrap().len(), 1);
}

#[tokio::test]
async fn self_connection_is_rejected() {
  let s = store().await;
  let a = Uuid::new_v4();
  assert!(matches!(s.connect(a, a).await, Err(Error::SelfConnection(id)) if id == a));
}

// ─── Statuses ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn latest_status_replaces_previous() {
  let s = store().await;
  let p = Uuid::new_v4();
  assert!(s.current_status(p).await.unwrap().is_none());

  s.set_status(p, "hello".into()).await.unwrap();
  let set = s.set_status(p, "goodbye".into()).await.unwrap();

  let current = s.current_status(p).await.unwrap().unwrap();
  assert_eq!(current, set);
  assert_eq!(current.message, "goodbye");
}

// ─── Privacy ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn privacy_round_trip_and_update() {
  let s = store().await;
  let p = Uuid::new_v4();
  assert!(s.privacy_of(p).await.unwrap().is_none());

  s.set_privacy(PrivacySettings::new(p)).await.unwrap();
  let updated = PrivacySettings {
    subject_id: p,
    wall:       PrivacyLevel::Everyone,
    status:     PrivacyLevel::OnlyMe,
  };
  s.set_privacy(updated.clone()).await.unwrap();

  assert_eq!(s.privacy_of(p).await.unwrap(), Some(updated));
}

// ─── Aggregator over SQLite ──────────────────────────────────────────────────

fn aggregator(
  s: &SqliteStore,
) -> WallAggregator<SqliteStore, SqliteStore, SqliteStore, SqliteStore> {
  let shared = Arc::new(s.clone());
  WallAggregator::new(
    Arc::clone(&shared),
    Arc::clone(&shared),
    Arc::clone(&shared),
    shared,
  )
}

#[tokio::test]
async fn posted_event_appears_on_friends_walls_only() {
  let s = store().await;
  let wall = aggregator(&s);
  let (alice, bob, carol) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
  s.connect(alice, bob).await.unwrap();
  s.set_privacy(PrivacySettings::new(bob)).await.unwrap();
  s.set_privacy(PrivacySettings::new(carol)).await.unwrap();

  assert_eq!(wall.post_event("profile.updated", alice).await.unwrap(), 1);

  let bobs = wall
    .list_wall_items_for(&FixedSession::viewer(bob), bob)
    .await
    .unwrap();
  let carols = wall
    .list_wall_items_for(&FixedSession::viewer(carol), carol)
    .await
    .unwrap();

  // Bob also sees nothing derived: Alice has no status yet.
  assert_eq!(bobs.len(), 1);
  assert_eq!(bobs[0].creator_id, alice);
  assert_eq!(bobs[0].text, "profile.updated");
  assert!(carols.is_empty());
}

#[tokio::test]
async fn friend_status_is_merged_and_counted() {
  let s = store().await;
  let wall = aggregator(&s);
  let (alice, bob, stranger) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
  s.connect(alice, bob).await.unwrap();
  s.set_privacy(PrivacySettings::new(alice)).await.unwrap();
  s.append(alice, &WallItem::event(bob, "joined.site", day(-1)))
    .await
    .unwrap();
  s.set_status(bob, "on holiday".into()).await.unwrap();

  let own = FixedSession::viewer(alice);
  let items = wall.list_wall_items_for(&own, alice).await.unwrap();
  assert_eq!(items.len(), 2);
  assert_eq!(items[0].kind, WallItemKind::Status);
  assert_eq!(items[0].text, "on holiday");
  assert_eq!(wall.count_wall_items_for(&own, alice).await.unwrap(), 2);

  // Default privacy is friends-only, so a stranger sees nothing.
  let other = FixedSession::viewer(stranger);
  assert!(wall.list_wall_items_for(&other, alice).await.unwrap().is_empty());
  assert_eq!(wall.count_wall_items_for(&other, alice).await.unwrap(), 0);
}
