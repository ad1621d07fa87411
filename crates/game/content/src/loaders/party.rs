//! Party roster loader.
//!
//! RON format: `Vec<MemberSpec>` in party order; the first member leads.

use std::path::Path;

use game_core::{Character, Stats};
use serde::Deserialize;

use crate::loaders::floors::SkillSpec;
use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub stats: Stats,
    #[serde(default)]
    pub skills: Vec<SkillSpec>,
}

fn default_role() -> String {
    "Adventurer".to_owned()
}

impl MemberSpec {
    pub fn build(&self) -> Character {
        Character::player(
            self.name.clone(),
            self.stats,
            self.skills.iter().map(SkillSpec::build).collect(),
            self.role.clone(),
        )
    }
}

/// Loader for party rosters from RON files.
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Character>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Character>> {
        let members: Vec<MemberSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;
        anyhow::ensure!(!members.is_empty(), "party is empty");
        for member in &members {
            anyhow::ensure!(member.stats.max_hp > 0, "party member '{}' has max_hp 0", member.name);
        }
        Ok(members.iter().map(MemberSpec::build).collect())
    }
}
