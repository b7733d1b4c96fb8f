//! Shared domain types for the JobStar reputation ledger.
//!
//! This crate contains the types every other crate speaks in: profile and
//! achievement identifiers, achievement records, ledger events, errors, and
//! configuration.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod achievement;
pub mod config;
pub mod error;
pub mod event;
pub mod profile;
