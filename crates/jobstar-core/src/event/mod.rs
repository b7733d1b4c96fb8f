//! Live distribution of committed ledger events.
//!
//! Provides an `EventBus` that fans `RecordedEvent` values out to all
//! subscribers via a `tokio::sync::broadcast` channel.

pub mod bus;

pub use bus::EventBus;
