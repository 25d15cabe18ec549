//! Append-only, in-memory record of captured notifications
//!
//! Readers always see the whole list. Growth is unbounded.

use crate::NormalizedEvent;
use std::sync::Arc;
use tokio::sync::watch;

/// Observable list of every captured notification, in capture order
///
/// Cloning gives another handle to the same log.
#[derive(Debug, Clone)]
pub struct EventLog {
    sender: Arc<watch::Sender<Vec<NormalizedEvent>>>,
}

impl EventLog {
    /// Creates an empty [`EventLog`]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());

        Self {
            sender: Arc::new(sender),
        }
    }

    /// Appends an event and notifies subscribers
    pub fn append(&self, event: NormalizedEvent) {
        self.sender.send_modify(|events| events.push(event));
    }

    /// Point-in-time copy of the log
    pub fn snapshot(&self) -> Vec<NormalizedEvent> {
        self.sender.borrow().clone()
    }

    /// Number of events captured so far
    pub fn len(&self) -> usize {
        self.sender.borrow().len()
    }

    /// Whether nothing has been captured yet
    pub fn is_empty(&self) -> bool {
        self.sender.borrow().is_empty()
    }

    /// Subscribes to future appends
    pub fn subscribe(&self) -> EventLogSubscription {
        EventLogSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives the full log after every append
///
/// Only the latest state is kept: a reader that falls behind skips to the
/// newest list rather than replaying each append.
#[derive(Debug)]
pub struct EventLogSubscription {
    receiver: watch::Receiver<Vec<NormalizedEvent>>,
}

impl EventLogSubscription {
    /// Waits for the next append and returns the whole log.
    ///
    /// Returns `None` once every [`EventLog`] handle is dropped.
    pub async fn changed(&mut self) -> Option<Vec<NormalizedEvent>> {
        self.receiver.changed().await.ok()?;

        Some(self.receiver.borrow_and_update().clone())
    }

    /// Current contents without waiting
    pub fn current(&self) -> Vec<NormalizedEvent> {
        self.receiver.borrow().clone()
    }
}
