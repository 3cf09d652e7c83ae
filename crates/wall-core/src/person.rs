//! Person: the opaque identity that owns a wall, a status and privacy
//! settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stable identity. Nothing about a person is mutable from the wall's
/// point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
  pub person_id: Uuid,
}

impl Person {
  pub fn new(person_id: Uuid) -> Self { Self { person_id } }
}
