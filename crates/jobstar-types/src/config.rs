//! Configuration types for the JobStar ledger.
//!
//! `LedgerConfig` represents the `config.toml` in the data directory. It
//! names the database file, sizes the event bus, and picks the log format.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.jobstar/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// SQLite database file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Capacity of the broadcast channel carrying live ledger events.
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_database_file() -> String {
    "jobstar.db".to_string()
}

fn default_event_bus_capacity() -> usize {
    1024
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            event_bus_capacity: default_event_bus_capacity(),
            logging: LoggingConfig::default(),
        }
    }
}

/// `[logging]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit log lines as JSON objects instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_config_default_values() {
        let config = LedgerConfig::default();
        assert_eq!(config.database_file, "jobstar.db");
        assert_eq!(config.event_bus_capacity, 1024);
        assert!(!config.logging.json);
        assert!(!config.logging.otel);
    }

    #[test]
    fn test_ledger_config_deserialize_with_defaults() {
        let config: LedgerConfig = toml::from_str("").unwrap();
        assert_eq!(config.database_file, "jobstar.db");
        assert_eq!(config.event_bus_capacity, 1024);
    }

    #[test]
    fn test_ledger_config_deserialize_with_values() {
        let toml_str = r#"
database_file = "ledger.sqlite"
event_bus_capacity = 64

[logging]
json = true
"#;
        let config: LedgerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_file, "ledger.sqlite");
        assert_eq!(config.event_bus_capacity, 64);
        assert!(config.logging.json);
        assert!(!config.logging.otel);
    }

    #[test]
    fn test_ledger_config_rejects_wrong_types() {
        let result: Result<LedgerConfig, _> = toml::from_str(r#"event_bus_capacity = "lots""#);
        assert!(result.is_err());
    }
}
