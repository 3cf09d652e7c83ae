//! [`WallAggregator`]: fan-out on write, merge-filter-sort-cap on read.
//!
//! A wall is assembled per request from two sources: events persisted in the
//! subject's [`WallStore`], and status items derived from each connection's
//! current status. Visibility is only ever decided here, at read time, so a
//! privacy change applies to everything already stored.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  item::{WallItem, newest_first},
  privacy::{PrivacyRules, PrivacySettings},
  session::SessionContext,
  store::{ConnectionGraph, StatusStore, WallStore},
};

/// Upper bound on the length of any assembled wall, persisted events and
/// derived statuses combined.
pub const MAX_WALL_ITEMS: usize = 30;

/// Builds walls from the four data collaborators.
///
/// Holds nothing but shared handles to its collaborators, so one instance can
/// serve any number of concurrent callers.
pub struct WallAggregator<W, G, S, P> {
  store:    Arc<W>,
  graph:    Arc<G>,
  statuses: Arc<S>,
  privacy:  Arc<P>,
}

impl<W, G, S, P> Clone for WallAggregator<W, G, S, P> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      graph:    Arc::clone(&self.graph),
      statuses: Arc::clone(&self.statuses),
      privacy:  Arc::clone(&self.privacy),
    }
  }
}

impl<W, G, S, P> WallAggregator<W, G, S, P>
where
  W: WallStore,
  G: ConnectionGraph,
  S: StatusStore,
  P: PrivacyRules,
{
  pub fn new(
    store: Arc<W>,
    graph: Arc<G>,
    statuses: Arc<S>,
    privacy: Arc<P>,
  ) -> Self {
    Self { store, graph, statuses, privacy }
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Post `event` to the wall of every connection of `creator`.
  ///
  /// The same item (one timestamp) is appended once per recipient. Returns the
  /// number of walls written; zero if `creator` has no connections. The first
  /// store failure aborts the fan-out.
  pub async fn post_event(&self, event: &str, creator: Uuid) -> Result<usize> {
    let connections = self
      .graph
      .connections_of(creator)
      .await
      .map_err(Error::collaborator)?;

    if connections.is_empty() {
      tracing::debug!(%creator, "no connections; event not posted");
      return Ok(0);
    }

    let item = WallItem::event(creator, event, Utc::now());
    for connection in &connections {
      self
        .store
        .append(connection.person_id, &item)
        .await
        .map_err(Error::collaborator)?;
    }

    tracing::debug!(%creator, walls = connections.len(), "event fanned out");
    Ok(connections.len())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The wall of `subject` as seen by the session's viewer, evaluated against
  /// the given privacy record.
  ///
  /// # Errors
  ///
  /// - [`Error::InvalidArgument`] if `subject` is nil.
  /// - [`Error::Unauthenticated`] if the session has no viewer.
  /// - [`Error::Collaborator`] if any backend call fails.
  ///
  /// A missing privacy record is not an error; nothing is visible.
  pub async fn list_wall_items(
    &self,
    session: &impl SessionContext,
    subject: Uuid,
    privacy: Option<&PrivacySettings>,
  ) -> Result<Vec<WallItem>> {
    let viewer = authorize(session, subject)?;
    match privacy {
      Some(privacy) => self.visible_items(subject, privacy, viewer).await,
      None => Ok(Vec::new()),
    }
  }

  /// Like [`list_wall_items`](Self::list_wall_items), with the subject's
  /// privacy record looked up from [`PrivacyRules`].
  pub async fn list_wall_items_for(
    &self,
    session: &impl SessionContext,
    subject: Uuid,
  ) -> Result<Vec<WallItem>> {
    authorize(session, subject)?;
    let privacy = self.lookup_privacy(subject).await?;
    self
      .list_wall_items(session, subject, privacy.as_ref())
      .await
  }

  /// The number of items [`list_wall_items`](Self::list_wall_items) returns
  /// for the same arguments.
  pub async fn count_wall_items(
    &self,
    session: &impl SessionContext,
    subject: Uuid,
    privacy: Option<&PrivacySettings>,
  ) -> Result<usize> {
    Ok(self.list_wall_items(session, subject, privacy).await?.len())
  }

  /// The number of items
  /// [`list_wall_items_for`](Self::list_wall_items_for) returns.
  pub async fn count_wall_items_for(
    &self,
    session: &impl SessionContext,
    subject: Uuid,
  ) -> Result<usize> {
    Ok(self.list_wall_items_for(session, subject).await?.len())
  }

  // ── Pipeline ──────────────────────────────────────────────────────────────

  async fn lookup_privacy(&self, subject: Uuid) -> Result<Option<PrivacySettings>> {
    self
      .privacy
      .privacy_of(subject)
      .await
      .map_err(Error::collaborator)
  }

  async fn are_friends(&self, a: Uuid, b: Uuid) -> Result<bool> {
    self.graph.are_friends(a, b).await.map_err(Error::collaborator)
  }

  /// The single source of truth for both list and count: visible persisted
  /// events plus visible derived statuses, newest first, capped.
  async fn visible_items(
    &self,
    subject: Uuid,
    privacy: &PrivacySettings,
    viewer: Uuid,
  ) -> Result<Vec<WallItem>> {
    let own_wall = subject == viewer;

    if !own_wall {
      let friend = self.are_friends(subject, viewer).await?;
      if !self.privacy.wall_visible(subject, privacy, viewer, friend) {
        tracing::debug!(%subject, %viewer, "wall hidden from viewer");
        return Ok(Vec::new());
      }
    }

    let mut items = self
      .store
      .items_of(subject)
      .await
      .map_err(Error::collaborator)?;
    let persisted = items.len();

    let connections = self
      .graph
      .connections_of(subject)
      .await
      .map_err(Error::collaborator)?;

    for connection in connections {
      let owner = connection.person_id;
      let Some(status) = self
        .statuses
        .current_status(owner)
        .await
        .map_err(Error::collaborator)?
      else {
        continue;
      };

      // Gated on the subject's relationship to the status owner, never the
      // viewer's, so friends-of-friends see nothing extra.
      let allowed = own_wall || {
        let friend = self.are_friends(subject, owner).await?;
        self.privacy.status_visible(subject, privacy, owner, friend)
      };

      if allowed {
        items.push(WallItem::from_status(owner, &status));
      }
    }

    items.sort_by(newest_first);
    let merged = items.len();
    items.truncate(MAX_WALL_ITEMS);

    tracing::debug!(
      %subject,
      %viewer,
      persisted,
      derived = merged - persisted,
      returned = items.len(),
      "assembled wall"
    );
    Ok(items)
  }
}

/// Validate the subject and resolve the viewer. Runs before any backend call.
fn authorize(session: &impl SessionContext, subject: Uuid) -> Result<Uuid> {
  if subject.is_nil() {
    return Err(Error::InvalidArgument("must provide user id"));
  }
  session
    .current_viewer()
    .filter(|viewer| !viewer.is_nil())
    .ok_or(Error::Unauthenticated)
}
