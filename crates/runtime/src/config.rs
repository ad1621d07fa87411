//! Runtime settings read from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `DUNGEON_AGENT` | `heuristic`, `random` or `qlearning` | `heuristic` |
//! | `DUNGEON_SEED` | environment RNG seed | `42` |
//! | `DUNGEON_TRAIN_EPISODES` | Q-learning episodes before the shown run | `0` |
//! | `DUNGEON_DATA_DIR` | directory with `floors.ron`, `party.ron`, `config.toml` | built-in content |
//! | `DUNGEON_QTABLE_PATH` | Q-table JSON to load and save | none |
//! | `DUNGEON_MAX_TURNS` | steps per floor before truncation | from content |

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::providers::AgentKind;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub agent: AgentKind,
    pub seed: u64,
    pub train_episodes: usize,
    pub data_dir: Option<PathBuf>,
    pub qtable_path: Option<PathBuf>,
    /// Overrides the content's turn limit when set.
    pub max_turns: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            agent: AgentKind::default(),
            seed: DEFAULT_SEED,
            train_episodes: 0,
            data_dir: None,
            qtable_path: None,
            max_turns: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = env::var("DUNGEON_AGENT") {
            match name.parse::<AgentKind>() {
                Ok(kind) => config.agent = kind,
                Err(err) => warn!(%err, fallback = %config.agent, "ignoring DUNGEON_AGENT"),
            }
        }
        if let Some(seed) = read_env::<u64>("DUNGEON_SEED") {
            config.seed = seed;
        }
        if let Some(episodes) = read_env::<usize>("DUNGEON_TRAIN_EPISODES") {
            config.train_episodes = episodes;
        }
        if let Some(dir) = read_env::<PathBuf>("DUNGEON_DATA_DIR") {
            config.data_dir = Some(dir);
        }
        if let Some(path) = read_env::<PathBuf>("DUNGEON_QTABLE_PATH") {
            config.qtable_path = Some(path);
        }
        if let Some(turns) = read_env::<u32>("DUNGEON_MAX_TURNS") {
            config.max_turns = Some(turns.max(1));
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
