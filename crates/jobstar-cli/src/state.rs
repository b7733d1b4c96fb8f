//! Application state wiring all services together.
//!
//! Services are generic over store and oracle traits; AppState pins them to
//! the SQLite implementations and shares one sequencer and one event bus
//! between the skill registry and the achievement ledger.

use std::path::PathBuf;
use std::sync::Arc;

use jobstar_core::event::EventBus;
use jobstar_core::service::Sequencer;
use jobstar_core::service::achievement::AchievementLedger;
use jobstar_core::service::skill::SkillRegistry;
use jobstar_infra::config::database_url;
use jobstar_infra::sqlite::achievement::SqliteAchievementRepository;
use jobstar_infra::sqlite::pool::DatabasePool;
use jobstar_infra::sqlite::profile::SqliteProfileRegistry;
use jobstar_infra::sqlite::skill::SqliteSkillRepository;
use jobstar_types::config::LedgerConfig;

/// The local registry doubles as the ownership oracle.
pub type ConcreteOracle = Arc<SqliteProfileRegistry>;

pub type ConcreteSkillRegistry = SkillRegistry<SqliteSkillRepository, ConcreteOracle>;

pub type ConcreteAchievementLedger = AchievementLedger<SqliteAchievementRepository, ConcreteOracle>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub profiles: ConcreteOracle,
    pub skills: Arc<ConcreteSkillRegistry>,
    pub achievements: Arc<ConcreteAchievementLedger>,
    pub config: LedgerConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(data_dir: PathBuf, config: LedgerConfig) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = database_url(&data_dir, &config);
        let db_pool = DatabasePool::new(&db_url).await?;

        let profiles = Arc::new(SqliteProfileRegistry::new(db_pool.clone()));
        let sequencer = Sequencer::new();
        let bus = EventBus::new(config.event_bus_capacity);

        let skills = SkillRegistry::new(
            SqliteSkillRepository::new(db_pool.clone()),
            Arc::clone(&profiles),
            sequencer.clone(),
            bus.clone(),
        );
        let achievements = AchievementLedger::new(
            SqliteAchievementRepository::new(db_pool.clone()),
            Arc::clone(&profiles),
            sequencer,
            bus,
        );

        tracing::debug!(data_dir = %data_dir.display(), "Ledger state initialized");

        Ok(Self {
            profiles,
            skills: Arc::new(skills),
            achievements: Arc::new(achievements),
            config,
            data_dir,
        })
    }
}
