use crate::Relay;
use bytes::Bytes;

/// A [`Relay`] that won't do anything with payloads
#[derive(Debug, Default, Clone, Copy)]
pub struct Noop;

impl Noop {
    /// Creates an instance of [`Noop`] [`Relay`]
    pub fn new() -> Self {
        Self
    }
}

impl Relay for Noop {
    fn transport(&self, _payload: Bytes) -> crate::Result<()> {
        Ok(())
    }
}
