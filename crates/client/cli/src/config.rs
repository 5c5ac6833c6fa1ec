//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use rail_runtime::RuntimeConfig;

/// Configuration required to bootstrap the runtime and the command loop.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// Directory holding `catalog.toml`, `market.ron`, `phases.ron` and
    /// `config.toml`; the built-in tables are used when unset.
    pub data_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    /// Seats a game at startup when no saved game was restored.
    pub players: Vec<String>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (in addition to those read by [`RuntimeConfig::from_env`]):
    /// - `RAIL_DATA_DIR` - Directory of table files (default: built-in tables)
    /// - `RAIL_SESSION_ID` - Log directory name (default: timestamp)
    /// - `RAIL_PLAYERS` - Comma-separated player names to seat at startup
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::from_env(),
            data_dir: env::var_os("RAIL_DATA_DIR").map(PathBuf::from),
            session_id: env::var("RAIL_SESSION_ID").ok(),
            players: env::var("RAIL_PLAYERS")
                .map(|value| split_names(&value))
                .unwrap_or_default(),
        }
    }
}

/// Splits a comma-separated list, dropping blank entries.
pub fn split_names(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_list_ignores_blanks() {
        assert_eq!(
            split_names(" Ada, Grace ,,Linus "),
            vec!["Ada".to_string(), "Grace".to_string(), "Linus".to_string()]
        );
        assert!(split_names(" , ").is_empty());
    }
}
