//! Floor catalog loader.
//!
//! RON format: `Vec<FloorSpec>`, one entry per floor in descent order.
//!
//! ```ron
//! [
//!     (
//!         name: "Slime Tunnels",
//!         enemies: [
//!             (
//!                 name: "Green Slime",
//!                 stats: (max_hp: 20, max_mp: 0, attack: 8, defense: 2, speed: 5),
//!                 behavior: Ai(Random),
//!             ),
//!         ],
//!     ),
//! ]
//! ```

use std::path::Path;

use game_core::{
    Character, DungeonFloorConfig, EnemyAi, FireDragon, Skill, SkillKind, SkillRef, Stats,
    DEFAULT_ENRAGE_THRESHOLD,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkillSpec {
    pub name: String,
    pub mp_cost: u32,
    pub power: u32,
    pub kind: SkillKind,
}

impl SkillSpec {
    pub fn build(&self) -> SkillRef {
        Skill::new(self.name.clone(), self.mp_cost, self.power, self.kind).shared()
    }
}

/// Decision source of a spawned enemy.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub enum BehaviorSpec {
    Ai(EnemyAi),
    FireDragon {
        #[serde(default = "default_enrage_threshold")]
        enrage_threshold: f64,
    },
}

fn default_enrage_threshold() -> f64 {
    DEFAULT_ENRAGE_THRESHOLD
}

impl Default for BehaviorSpec {
    fn default() -> Self {
        Self::Ai(EnemyAi::Random)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EnemySpec {
    pub name: String,
    pub stats: Stats,
    #[serde(default)]
    pub skills: Vec<SkillSpec>,
    #[serde(default)]
    pub behavior: BehaviorSpec,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FloorSpec {
    pub name: String,
    #[serde(default)]
    pub boss: bool,
    pub enemies: Vec<EnemySpec>,
}

/// Enemy template with its skills already shared.
struct EnemyTemplate {
    name: String,
    stats: Stats,
    skills: Vec<SkillRef>,
    behavior: BehaviorSpec,
}

impl EnemyTemplate {
    fn spawn(&self) -> Character {
        let skills = self.skills.clone();
        match self.behavior {
            BehaviorSpec::Ai(ai) => Character::enemy(self.name.clone(), self.stats, skills, ai),
            BehaviorSpec::FireDragon { enrage_threshold } => Character::boss(
                self.name.clone(),
                self.stats,
                skills,
                FireDragon::new(enrage_threshold),
            ),
        }
    }
}

impl FloorSpec {
    /// Checks the spec and turns it into a floor whose factory spawns fresh
    /// enemies sharing one set of skills.
    pub fn into_floor(self) -> LoadResult<DungeonFloorConfig> {
        anyhow::ensure!(!self.enemies.is_empty(), "floor '{}' has no enemies", self.name);
        for enemy in &self.enemies {
            anyhow::ensure!(
                enemy.stats.max_hp > 0,
                "enemy '{}' on floor '{}' has max_hp 0",
                enemy.name,
                self.name
            );
            if let BehaviorSpec::FireDragon { enrage_threshold } = enemy.behavior {
                anyhow::ensure!(
                    (0.0..=1.0).contains(&enrage_threshold),
                    "enemy '{}' has enrage_threshold {} outside [0, 1]",
                    enemy.name,
                    enrage_threshold
                );
            }
        }

        let templates: Vec<EnemyTemplate> = self
            .enemies
            .into_iter()
            .map(|enemy| EnemyTemplate {
                skills: enemy.skills.iter().map(SkillSpec::build).collect(),
                name: enemy.name,
                stats: enemy.stats,
                behavior: enemy.behavior,
            })
            .collect();
        let factory = move || -> Vec<Character> { templates.iter().map(EnemyTemplate::spawn).collect() };

        Ok(if self.boss {
            DungeonFloorConfig::boss(self.name, factory)
        } else {
            DungeonFloorConfig::new(self.name, factory)
        })
    }
}

/// Loader for floor catalogs from RON files.
pub struct FloorLoader;

impl FloorLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<DungeonFloorConfig>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<DungeonFloorConfig>> {
        let specs: Vec<FloorSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse floor catalog RON: {}", e))?;
        anyhow::ensure!(!specs.is_empty(), "floor catalog is empty");
        specs.into_iter().map(FloorSpec::into_floor).collect()
    }
}
