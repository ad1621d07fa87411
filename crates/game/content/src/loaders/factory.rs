//! Content factory for building a dungeon from data files.

use std::path::{Path, PathBuf};

use game_core::{BattleConfig, Character, DungeonFloorConfig};

use crate::loaders::{ConfigLoader, FloorLoader, LoadResult, PartyLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── party.ron
/// └── floors.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle tuning from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the party from `party.ron`.
    pub fn load_party(&self) -> LoadResult<Vec<Character>> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    /// Load the floor catalog from `floors.ron`.
    pub fn load_floors(&self) -> LoadResult<Vec<DungeonFloorConfig>> {
        FloorLoader::load(&self.data_dir.join("floors.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
