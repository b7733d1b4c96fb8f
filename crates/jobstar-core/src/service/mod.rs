//! Ledger services (use cases).
//!
//! Services authorize callers, drive the stores, and publish committed
//! events. They depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod achievement;
pub mod skill;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Total order over ledger mutations.
///
/// One sequencer is shared by every service writing to the same ledger.
/// A mutation holds its turn from the first validation read through the
/// commit, so no other mutation can interleave between the two.
#[derive(Clone, Default)]
pub struct Sequencer {
    turn: Arc<Mutex<()>>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for this caller's turn. The turn ends when the guard drops.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("busy", &self.turn.try_lock().is_err())
            .finish()
    }
}
