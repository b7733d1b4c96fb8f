//! Skill store trait definition.

use jobstar_types::error::RepositoryError;
use jobstar_types::event::RecordedEvent;
use jobstar_types::profile::{Address, ProfileId};

/// Per-profile ordered skill lists.
pub trait SkillRepository: Send + Sync {
    /// Current skills of a profile. Empty for a profile never written.
    fn skills(
        &self,
        profile_id: ProfileId,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Replace the whole list for `profile_id` and journal a `SkillsUpdated`
    /// event carrying the previous list.
    fn replace_skills(
        &self,
        profile_id: ProfileId,
        owner: &Address,
        new_skills: &[String],
    ) -> impl std::future::Future<Output = Result<RecordedEvent, RepositoryError>> + Send;
}
