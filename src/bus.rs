use crate::NormalizedEvent;
use tokio::sync::broadcast;

/// Default bus capacity (events)
pub const DEFAULT_BUS_CAPACITY: usize = 1_024;

/// Process-local broadcast of captured notifications
///
/// Listeners receive events published after they subscribed. Slow listeners
/// lose the oldest events once the capacity is exceeded.
#[derive(Debug, Clone)]
pub struct LocalBus {
    sender: broadcast::Sender<NormalizedEvent>,
}

impl LocalBus {
    /// Creates a bus holding up to `capacity` undelivered events per listener
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));

        Self { sender }
    }

    /// Sends an event to every current listener.
    ///
    /// Fire-and-forget: having no listeners is fine.
    pub fn publish(&self, event: NormalizedEvent) {
        let _ = self.sender.send(event);
    }

    /// Starts listening
    pub fn subscribe(&self) -> broadcast::Receiver<NormalizedEvent> {
        self.sender.subscribe()
    }

    /// Number of active listeners
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}
