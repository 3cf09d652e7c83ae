//! Core types and trait definitions for the wall feed.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines the collaborator contracts (wall store, connection graph, status
//! store, privacy rules, session) and the [`wall::WallAggregator`] that merges
//! them into a per-user feed.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod item;
pub mod person;
pub mod privacy;
pub mod session;
pub mod store;
pub mod wall;

pub use error::{Error, Result};
