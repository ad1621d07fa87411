//! Assembles floors, party and battle tuning into an environment.

use std::path::Path;

use game_content::{ContentFactory, default_floors, default_party};
use game_core::{BattleConfig, Character, DungeonBattleEnv, DungeonFloorConfig};
use tracing::info;

use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;

/// Everything needed to open a dungeon.
#[derive(Debug)]
pub struct DungeonSetup {
    pub floors: Vec<DungeonFloorConfig>,
    pub party: Vec<Character>,
    pub battle: BattleConfig,
}

impl DungeonSetup {
    /// Built-in party and the three default floors.
    pub fn builtin() -> Self {
        Self {
            floors: default_floors(),
            party: default_party(),
            battle: BattleConfig::default(),
        }
    }

    /// Reads `floors.ron`, `party.ron` and the optional `config.toml` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let factory = ContentFactory::new(dir);
        let content_error = |err: &dyn std::fmt::Display| RuntimeError::Content {
            path: dir.to_path_buf(),
            message: format!("{err:#}"),
        };

        let floors = factory.load_floors().map_err(|err| content_error(&err))?;
        let party = factory.load_party().map_err(|err| content_error(&err))?;
        let battle = factory.load_config().map_err(|err| content_error(&err))?;
        Ok(Self { floors, party, battle })
    }

    /// Content selected by `config`, with its turn limit applied.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let mut setup = match &config.data_dir {
            Some(dir) => Self::from_dir(dir)?,
            None => Self::builtin(),
        };
        if let Some(limit) = config.max_turns {
            setup.battle = setup.battle.with_max_turns(limit);
        }
        info!(
            floors = setup.floors.len(),
            party = setup.party.len(),
            max_turns = ?setup.battle.max_turns,
            "dungeon content ready"
        );
        Ok(setup)
    }

    /// Moves the content into a fresh environment seeded with `seed`.
    pub fn into_env(self, seed: u64) -> Result<DungeonBattleEnv> {
        let env = DungeonBattleEnv::new(self.floors, self.party, seed)?.with_config(self.battle);
        Ok(env)
    }
}
