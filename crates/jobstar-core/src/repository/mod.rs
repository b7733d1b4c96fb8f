//! Store trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (jobstar-infra) implements. The core crate never depends on any specific
//! storage technology.
//!
//! Every mutating method commits its state change together with the journal
//! entry describing it, and returns that entry. Stores do not authorize;
//! callers validate first and hold the ledger sequencer across validation and
//! commit.

pub mod achievement;
pub mod journal;
pub mod skill;
