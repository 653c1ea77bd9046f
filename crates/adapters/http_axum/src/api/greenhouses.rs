//! JSON REST handlers for greenhouses and timer actions.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use greenhub_app::ports::{Clock, EventPublisher, StateStore};
use greenhub_domain::duration::WateringDuration;
use greenhub_domain::id::GreenhouseKey;
use greenhub_domain::log::LogEntry;
use greenhub_domain::registry::{GreenhouseView, RegistrySnapshot};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for starting a countdown.
#[derive(Deserialize)]
pub struct StartRequest {
    /// One of the configured watering lengths, in minutes.
    pub minutes: u32,
}

/// `GET /api/greenhouses`
pub async fn list<S, C, P>(
    State(state): State<AppState<S, C, P>>,
) -> Result<Json<RegistrySnapshot>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Ok(Json(state.timers.snapshot()))
}

/// `GET /api/greenhouses/{key}`
pub async fn get<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    Path(key): Path<String>,
) -> Result<Json<GreenhouseView>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let view = state.timers.greenhouse(&GreenhouseKey::new(key))?;
    Ok(Json(view))
}

/// `POST /api/greenhouses/{key}/start`
pub async fn start<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    Path(key): Path<String>,
    Json(body): Json<StartRequest>,
) -> Result<Json<GreenhouseView>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let duration = WateringDuration::try_from(body.minutes)?;
    let view = state
        .timers
        .start(&GreenhouseKey::new(key), duration)
        .await?;
    Ok(Json(view))
}

/// `POST /api/greenhouses/{key}/cancel`
pub async fn cancel<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    Path(key): Path<String>,
) -> Result<Json<LogEntry>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let entry = state.timers.cancel(&GreenhouseKey::new(key)).await?;
    Ok(Json(entry))
}

/// `POST /api/greenhouses/{key}/acknowledge`
pub async fn acknowledge<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    state.timers.acknowledge(&GreenhouseKey::new(key)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/greenhouses/{key}/logs`
pub async fn logs<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<LogEntry>>, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let entries = state.timers.logs_for(&GreenhouseKey::new(key))?;
    Ok(Json(entries))
}
