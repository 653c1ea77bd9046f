//! JSON REST route assembly.

use axum::Router;
use axum::routing::{get, post};

use greenhub_app::ports::{Clock, EventPublisher, StateStore};

use crate::state::AppState;

pub mod greenhouses;
pub mod logs;

/// Build the `/api` route tree.
pub fn routes<S, C, P>() -> Router<AppState<S, C, P>>
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/greenhouses", get(greenhouses::list))
        .route("/greenhouses/{key}", get(greenhouses::get))
        .route("/greenhouses/{key}/start", post(greenhouses::start))
        .route("/greenhouses/{key}/cancel", post(greenhouses::cancel))
        .route(
            "/greenhouses/{key}/acknowledge",
            post(greenhouses::acknowledge),
        )
        .route("/greenhouses/{key}/logs", get(greenhouses::logs))
        .route("/logs", get(logs::list))
}
