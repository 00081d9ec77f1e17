//! # lcfs-sync — Persistence Sync
//!
//! The grid owns no network code. This crate supplies the collaborator
//! that does: a [`SummaryStore`] abstraction, the [`LineOverrides`] payload
//! a store accepts, and a background worker whose [`SyncHandle`] plugs into
//! the grid as its [`CommitSink`](lcfs_grid::CommitSink).
//!
//! Saves are last-write-wins. After each save the authoritative rows are
//! reloaded and published; the host passes them back to the grid, which
//! overwrites any local state.

pub mod error;
pub mod overrides;
pub mod store;
pub mod worker;

pub use error::SyncError;
pub use overrides::LineOverrides;
pub use store::{InMemoryStore, StoredSummary, SummaryStore};
pub use worker::{PersistenceSync, SyncHandle};
