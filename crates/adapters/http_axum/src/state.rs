//! Shared application state for axum handlers.

use std::sync::Arc;

use greenhub_app::ports::{Clock, EventPublisher, StateStore};
use greenhub_app::services::timer_service::TimerService;

/// Application state shared across all axum handlers.
///
/// Generic over the store, clock, and publisher types to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<S, C, P> {
    /// The watering timer controller.
    pub timers: Arc<TimerService<S, C, P>>,
}

impl<S, C, P> Clone for AppState<S, C, P> {
    fn clone(&self) -> Self {
        Self {
            timers: Arc::clone(&self.timers),
        }
    }
}

impl<S, C, P> AppState<S, C, P>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Wrap a timer service for sharing with handlers and the ticker task.
    pub fn new(timers: Arc<TimerService<S, C, P>>) -> Self {
        Self { timers }
    }
}
