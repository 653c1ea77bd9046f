//! JSON REST handlers for the watering log.

use axum::Json;
use axum::extract::State;

use greenhub_app::ports::{Clock, EventPublisher, StateStore};
use greenhub_domain::log::LogEntry;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/logs` — all retained entries, newest-first.
pub async fn list<S, C, P>(
    State(state): State<AppState<S, C, P>>,
) -> Result<Json<Vec<LogEntry>>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Ok(Json(state.timers.logs()))
}
