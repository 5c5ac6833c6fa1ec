//! Game configuration loader.

use std::path::Path;

use rail_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_is_read_and_defaulted() {
        let config = ConfigLoader::parse("notification_stagger_ms = 150").unwrap();
        assert_eq!(config.notification_stagger_ms, 150);

        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(
            config.notification_stagger_ms,
            GameConfig::DEFAULT_NOTIFICATION_STAGGER_MS
        );
    }
}
