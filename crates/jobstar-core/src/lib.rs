//! Ledger services and port definitions for JobStar.
//!
//! This crate defines the "ports" (store and oracle traits) that the
//! infrastructure layer implements, plus the services that enforce the
//! ledger's rules on top of them. It depends only on `jobstar-types` --
//! never on `jobstar-infra` or any database/IO crate.

pub mod event;
pub mod guard;
pub mod oracle;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
