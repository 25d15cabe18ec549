//! [`Relay`] is an abstraction on where captured notifications will be sent to

mod client;
mod http;
mod noop;

pub use self::client::*;
pub use self::http::*;
pub use self::noop::*;

use std::sync::Arc;

/// Trait for payload transportation
///
/// Implementations must return without waiting on I/O: the caller is the
/// notification source itself.
pub trait Relay {
    /// Accepts an encoded notification to be sent over the wire
    fn transport(&self, payload: bytes::Bytes) -> crate::Result<()>;
}

impl<R: Relay + ?Sized> Relay for Arc<R> {
    fn transport(&self, payload: bytes::Bytes) -> crate::Result<()> {
        (**self).transport(payload)
    }
}
