//! Battle configuration loader.

use std::path::Path;

use game_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle tuning from TOML files.
///
/// Missing keys fall back to the defaults of [`BattleConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if let Some(limit) = config.max_turns {
            anyhow::ensure!(limit > 0, "max_turns must be positive when set");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_turns = 40\n\n[rewards]\nkill = 12.5\n");
        let Ok(config) = config else {
            panic!("config should parse");
        };
        assert_eq!(config.max_turns, Some(40));
        assert_eq!(config.rewards.kill, 12.5);
        assert_eq!(config.rewards.victory, 50.0);
    }

    #[test]
    fn zero_turn_limit_is_rejected() {
        assert!(ConfigLoader::parse("max_turns = 0").is_err());
    }
}
