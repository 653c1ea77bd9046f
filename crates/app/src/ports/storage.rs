//! Storage port — durable persistence for the registry and watering log.
//!
//! The store is a whole-document bridge, not a row store: every mutation
//! rewrites the full snapshot. `load_*` returns `Ok(None)` both when nothing
//! has been persisted yet and when the persisted payload is malformed — the
//! caller falls back to the default initial state in either case. Only
//! unexpected IO failures surface as errors, and the timer service swallows
//! those on the write path (in-memory state stays authoritative for the
//! session).

use std::future::Future;

use greenhub_domain::error::GreenhubError;
use greenhub_domain::log::WateringLog;
use greenhub_domain::registry::PersistedState;

/// Durable key-value persistence for the two greenhub documents.
pub trait StateStore {
    /// Read the persisted registry snapshot, if a usable one exists.
    fn load_state(
        &self,
    ) -> impl Future<Output = Result<Option<PersistedState>, GreenhubError>> + Send;

    /// Overwrite the persisted registry snapshot.
    fn save_state(
        &self,
        state: PersistedState,
    ) -> impl Future<Output = Result<(), GreenhubError>> + Send;

    /// Read the persisted watering log, if a usable one exists.
    fn load_log(&self) -> impl Future<Output = Result<Option<WateringLog>, GreenhubError>> + Send;

    /// Overwrite the persisted watering log.
    fn save_log(&self, log: WateringLog)
    -> impl Future<Output = Result<(), GreenhubError>> + Send;
}

impl<T: StateStore + Sync> StateStore for std::sync::Arc<T> {
    fn load_state(
        &self,
    ) -> impl Future<Output = Result<Option<PersistedState>, GreenhubError>> + Send {
        T::load_state(self)
    }

    fn save_state(
        &self,
        state: PersistedState,
    ) -> impl Future<Output = Result<(), GreenhubError>> + Send {
        T::save_state(self, state)
    }

    fn load_log(&self) -> impl Future<Output = Result<Option<WateringLog>, GreenhubError>> + Send {
        T::load_log(self)
    }

    fn save_log(
        &self,
        log: WateringLog,
    ) -> impl Future<Output = Result<(), GreenhubError>> + Send {
        T::save_log(self, log)
    }
}
