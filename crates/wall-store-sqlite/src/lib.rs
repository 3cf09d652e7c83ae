//! SQLite backend for the wall.
//!
//! One [`SqliteStore`] implements every data collaborator the aggregator
//! needs: posted wall items, the connection graph, current statuses and
//! privacy records. Wraps [`tokio_rusqlite`] so all database access runs on a
//! dedicated thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DEFAULT_ITEM_LIMIT, SqliteStore};

#[cfg(test)]
mod tests;
