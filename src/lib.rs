//! Captures device notifications, relays each one to an HTTP endpoint and keeps
//! an observable in-memory log of everything captured.
//!
//! ```no_run
//! use notification_relay::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let endpoint = EndpointStore::new();
//! let relay = Http::new(ClientConfig::default(), endpoint.clone())?;
//! let capture = Capture::new(relay);
//!
//! capture.on_raw_event(RawEvent::new(Some("com.bank.app"), Some("Payment"), None));
//!
//! assert_eq!(capture.log().len(), 1);
//! # Ok(())
//! # }
//! ```
#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    unreachable_pub,
    unreachable_code,
    unused_mut,
    clippy::wildcard_imports
)]

mod bus;
mod capture;
mod config;
mod error;
mod event;
mod event_log;
mod payload;
mod relay;

pub use self::bus::*;
pub use self::capture::*;
pub use self::config::*;
pub use self::error::*;
pub use self::event::*;
pub use self::event_log::*;
pub use self::payload::*;
pub use self::relay::*;
