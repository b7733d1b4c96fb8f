//! Configuration loader and data directory resolution.
//!
//! Reads `config.toml` from the data directory (`~/.jobstar/` in production)
//! and deserializes it into [`LedgerConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use jobstar_types::config::LedgerConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "JOBSTAR_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. Explicit override (e.g. `--data-dir`)
/// 2. `JOBSTAR_DATA_DIR` environment variable
/// 3. `~/.jobstar`
/// 4. `./.jobstar`
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".jobstar");
    }

    PathBuf::from(".jobstar")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`LedgerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_ledger_config(data_dir: &Path) -> LedgerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return LedgerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return LedgerConfig::default();
        }
    };

    match toml::from_str::<LedgerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            LedgerConfig::default()
        }
    }
}

/// SQLite URL for the configured database file inside `data_dir`.
pub fn database_url(data_dir: &Path, config: &LedgerConfig) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join(&config.database_file).display()
    )
}
