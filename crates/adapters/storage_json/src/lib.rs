//! # greenhub-adapter-storage-json
//!
//! Durable local persistence for greenhub, implemented as two JSON
//! documents in a data directory:
//!
//! | Document | File |
//! |----------|------|
//! | Registry snapshot (active timer + per-plot state) | `greenhouse-state-v1.json` |
//! | Watering log | `greenhouse-logs-v1.json` |
//!
//! The schema version is embedded in the file name so an incompatible
//! future schema lands in a different slot instead of colliding with this
//! one.
//!
//! ## Failure contract
//! - Missing or malformed documents load as `None`; the application layer
//!   falls back to its default initial state. Malformed payloads are logged
//!   and left on disk untouched until the next write replaces them.
//! - Writes go to a temp file first and are renamed into place, so a crash
//!   mid-write can't leave a truncated document behind.
//!
//! ## Dependency rule
//! Depends on `greenhub-app` (for the port trait) and `greenhub-domain`
//! (for the persisted types). The `app` and `domain` crates must never
//! reference this adapter.

mod error;
mod store;

pub use error::StorageError;
pub use store::{Config, JsonStateStore};
