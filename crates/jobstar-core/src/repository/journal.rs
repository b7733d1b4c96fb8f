//! Event journal trait definition.

use jobstar_types::error::RepositoryError;
use jobstar_types::event::{EventKind, RecordedEvent};

/// Read side of the journal the stores append to on every commit.
pub trait EventJournal: Send + Sync {
    /// Recorded events in commit order, optionally restricted to one kind.
    fn list_events(
        &self,
        kind: Option<EventKind>,
    ) -> impl std::future::Future<Output = Result<Vec<RecordedEvent>, RepositoryError>> + Send;
}
