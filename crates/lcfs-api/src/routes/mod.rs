//! # API Route Modules
//!
//! - `summary` — read a report summary with its column schema, and write
//!   user overrides back to the store.

pub mod summary;
