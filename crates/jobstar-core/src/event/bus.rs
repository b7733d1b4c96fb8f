//! Broadcast event bus for distributing `RecordedEvent` to multiple subscribers.
//!
//! Built on `tokio::sync::broadcast`. The ledger publishes only after a
//! commit, so subscribers never observe an event for a rejected call.
//! Publishing with no active subscribers is a no-op.

use jobstar_types::event::RecordedEvent;
use tokio::sync::broadcast;

/// Smallest channel the bus will create.
const MIN_CAPACITY: usize = 16;

/// Multi-consumer bus for committed ledger events.
///
/// Cloning the bus clones the sender, so the skill registry and the
/// achievement ledger can share one stream.
pub struct EventBus {
    sender: broadcast::Sender<RecordedEvent>,
}

impl EventBus {
    /// Create a new event bus. Capacities below 16 are raised to 16.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(MIN_CAPACITY));
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<RecordedEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: RecordedEvent) {
        let _ = self.sender.send(event);
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jobstar_types::achievement::AchievementId;
    use jobstar_types::event::LedgerEvent;
    use jobstar_types::profile::ProfileId;

    fn sample_event(sequence: u64) -> RecordedEvent {
        RecordedEvent {
            sequence,
            recorded_at: Utc::now(),
            event: LedgerEvent::AchievementProposed {
                achievement_id: AchievementId(sequence),
                issuer_profile_id: ProfileId(2),
                worker_profile_id: ProfileId(1),
            },
        }
    }

    #[tokio::test]
    async fn publish_and_subscribe_delivers_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(sample_event(1));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.sequence, 1);
        assert!(matches!(received.event, LedgerEvent::AchievementProposed { .. }));
    }

    #[tokio::test]
    async fn multiple_subscribers_each_receive_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(sample_event(1));

        assert_eq!(rx1.recv().await.unwrap().sequence, 1);
        assert_eq!(rx2.recv().await.unwrap().sequence, 1);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::new(16);
        bus.publish(sample_event(1));
        bus.publish(sample_event(2));
    }

    #[test]
    fn clone_shares_channel() {
        let bus = EventBus::new(16);
        let bus2 = bus.clone();
        let mut rx = bus.subscribe();

        bus2.publish(sample_event(1));

        assert_eq!(rx.try_recv().unwrap().sequence, 1);
        drop(bus);
        bus2.publish(sample_event(2));
        assert_eq!(rx.try_recv().unwrap().sequence, 2);
    }

    #[test]
    fn tiny_capacity_is_raised() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();
        for i in 1..=MIN_CAPACITY as u64 {
            bus.publish(sample_event(i));
        }
        assert_eq!(rx.try_recv().unwrap().sequence, 1);
    }
}
