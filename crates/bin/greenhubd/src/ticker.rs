//! The 1 Hz ticker task driving the active countdown.
//!
//! The cadence lives here in the composition root so tests can drive the
//! timer service directly with a manual clock instead; the service itself
//! never owns an ambient interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use greenhub_app::ports::{Clock, EventPublisher, StateStore};
use greenhub_app::services::timer_service::TimerService;

/// Run the tick loop forever. Intended to be `tokio::spawn`-ed from main.
pub async fn run<S, C, P>(timers: Arc<TimerService<S, C, P>>)
where
    S: StateStore + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // Remaining time is recomputed from the absolute deadline, so there is
    // no need to replay ticks missed under load.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        match timers.tick().await {
            Ok(Some(entry)) => {
                tracing::info!(
                    greenhouse = %entry.greenhouse_id,
                    minutes = entry.duration,
                    "watering run completed"
                );
            }
            Ok(None) => {}
            Err(err) => tracing::error!(error = %err, "tick failed"),
        }
    }
}
