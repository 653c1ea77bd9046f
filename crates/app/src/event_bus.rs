//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use greenhub_domain::error::GreenhubError;

use crate::ports::{EventPublisher, WateringEvent};

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<WateringEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WateringEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: WateringEvent,
    ) -> impl Future<Output = Result<(), GreenhubError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenhub_domain::id::GreenhouseKey;

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(WateringEvent::Started {
            key: GreenhouseKey::new("solar0"),
            minutes: 5,
        })
        .await
        .unwrap();

        let received = rx.recv().await.unwrap();
        assert!(matches!(
            received,
            WateringEvent::Started { key, minutes: 5 } if key.as_str() == "solar0"
        ));
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(WateringEvent::Acknowledged {
            key: GreenhouseKey::new("solar1"),
        })
        .await
        .unwrap();

        assert!(matches!(
            rx1.recv().await.unwrap(),
            WateringEvent::Acknowledged { .. }
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            WateringEvent::Acknowledged { .. }
        ));
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        let result = bus
            .publish(WateringEvent::Acknowledged {
                key: GreenhouseKey::new("solar0"),
            })
            .await;
        assert!(result.is_ok());
    }
}
