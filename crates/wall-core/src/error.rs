//! Error types for `wall-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required identifier was missing. This is a caller bug, not a
  /// recoverable condition.
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),

  /// No viewer could be resolved from the session.
  #[error("you must be logged in to request a user's wall items")]
  Unauthenticated,

  /// A store, graph, status or privacy backend failed. Propagated as-is.
  #[error("collaborator error: {0}")]
  Collaborator(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error. Used as `.map_err(Error::collaborator)`.
  pub fn collaborator<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Collaborator(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
