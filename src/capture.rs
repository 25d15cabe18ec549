use crate::{encode, EventLog, LocalBus, NormalizedEvent, RawEvent, Relay};

/// Entry point for notifications coming from the host platform
///
/// Every accepted event is relayed, republished on the [`LocalBus`] and
/// appended to the [`EventLog`]. None of these steps can stop the others.
#[derive(Debug)]
pub struct Capture<R> {
    relay: R,
    log: EventLog,
    bus: LocalBus,
}

impl<R: Relay> Capture<R> {
    /// Creates a [`Capture`] with a fresh log and bus
    pub fn new(relay: R) -> Self {
        Self::with_parts(relay, EventLog::new(), LocalBus::default())
    }

    /// Creates a [`Capture`] writing into existing log and bus handles
    pub fn with_parts(relay: R, log: EventLog, bus: LocalBus) -> Self {
        Self { relay, log, bus }
    }

    /// Handles one platform notification.
    ///
    /// Returns without waiting on the network. Relay failures are logged.
    pub fn on_raw_event(&self, raw: RawEvent) {
        let event = NormalizedEvent::from(raw);

        tracing::debug!(
            package = event.source_id.as_deref().unwrap_or_default(),
            "Notification captured"
        );

        if let Err(ref error) = self.relay.transport(encode(&event)) {
            tracing::error!(%error, "Couldn't hand notification to relay");
        }

        self.bus.publish(event.clone());
        self.log.append(event);
    }

    /// Log of everything captured
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Bus the captured events are republished on
    pub fn bus(&self) -> &LocalBus {
        &self.bus
    }

    /// Relay the events are handed to
    pub fn relay(&self) -> &R {
        &self.relay
    }
}
