//! Event publisher port — fan-out of watering events to in-process
//! subscribers.

use std::future::Future;

use greenhub_domain::error::GreenhubError;
use greenhub_domain::id::GreenhouseKey;
use greenhub_domain::log::LogEntry;

/// Something that happened to a watering timer.
#[derive(Debug, Clone)]
pub enum WateringEvent {
    /// A countdown was started.
    Started {
        key: GreenhouseKey,
        minutes: u32,
    },
    /// A countdown reached zero; the log entry was already recorded.
    Completed { entry: LogEntry },
    /// A running countdown was canceled; the log entry records elapsed time.
    Canceled { entry: LogEntry },
    /// A completed countdown was acknowledged and the plot returned to idle.
    Acknowledged { key: GreenhouseKey },
}

/// Publisher side of the event bus.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    ///
    /// Publishing must succeed even when nobody is listening.
    fn publish(
        &self,
        event: WateringEvent,
    ) -> impl Future<Output = Result<(), GreenhubError>> + Send;
}
