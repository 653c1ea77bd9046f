//! # greenhubd — greenhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Construct the JSON state store and restore persisted state
//! - Construct the timer service, injecting the store, clock, and event bus
//! - Spawn the 1 Hz ticker task
//! - Build the axum router and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod ticker;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use greenhub_adapter_http_axum::state::AppState;
use greenhub_app::event_bus::InProcessEventBus;
use greenhub_app::ports::{SystemClock, WateringEvent};
use greenhub_app::services::timer_service::TimerService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Storage
    let store = greenhub_adapter_storage_json::Config {
        data_dir: config.storage.data_dir.clone().into(),
    }
    .build();

    // Event bus
    let event_bus = InProcessEventBus::new(256);
    let mut events = event_bus.subscribe();

    // Timer service, restored from disk (or defaults on first run)
    let timers = Arc::new(
        TimerService::initialize(store, SystemClock, event_bus, config.registry()).await,
    );

    // Ticker
    tokio::spawn(ticker::run(Arc::clone(&timers)));

    // Event log
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                WateringEvent::Started { key, minutes } => {
                    tracing::info!(greenhouse = %key, minutes, "watering started");
                }
                WateringEvent::Canceled { entry } => {
                    tracing::info!(
                        greenhouse = %entry.greenhouse_id,
                        elapsed_minutes = entry.duration,
                        "watering canceled"
                    );
                }
                WateringEvent::Acknowledged { key } => {
                    tracing::debug!(greenhouse = %key, "completion acknowledged");
                }
                // The ticker already logs completions.
                WateringEvent::Completed { .. } => {}
            }
        }
    });

    // HTTP
    let app = greenhub_adapter_http_axum::router::build(AppState::new(timers));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "greenhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown signal handler");
    }
}
