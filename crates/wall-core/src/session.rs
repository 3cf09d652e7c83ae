//! The authenticated-session seam.

use uuid::Uuid;

/// Resolves who is making the current request.
pub trait SessionContext {
  /// The authenticated viewer, or `None` for an anonymous request.
  fn current_viewer(&self) -> Option<Uuid>;
}

/// A session whose viewer was resolved up front, e.g. by an HTTP auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedSession(pub Option<Uuid>);

impl FixedSession {
  pub fn viewer(id: Uuid) -> Self { Self(Some(id)) }

  pub fn anonymous() -> Self { Self(None) }
}

impl SessionContext for FixedSession {
  fn current_viewer(&self) -> Option<Uuid> { self.0 }
}
