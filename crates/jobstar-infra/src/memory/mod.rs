//! Process-local implementations.
//!
//! State lives for the lifetime of the value and is lost on drop. Used by
//! tests and by callers embedding the ledger without a database.

pub mod ledger;
pub mod profiles;

pub use ledger::InMemoryLedgerStore;
pub use profiles::InMemoryProfileRegistry;
