//! Discretised state and target-agnostic action keys.

use std::fmt;

use game_core::{ActionType, BattleAction, BattleState, CharacterId};
use serde::{Deserialize, Serialize};

/// Number of HP buckets; the top bucket includes full health.
pub const HP_BUCKETS: u8 = 4;

/// Coarse view of the battle from one player's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    pub floor: usize,
    /// `0..HP_BUCKETS`, by the actor's HP ratio.
    pub hp_bucket: u8,
    /// The actor can afford at least one of its skills.
    pub mp_ok: bool,
    pub living_enemies: usize,
    pub boss_alive: bool,
}

impl StateKey {
    pub fn encode(battle: &BattleState, actor: CharacterId) -> Self {
        let (hp_bucket, mp_ok) = match battle.character(actor) {
            Some(character) if character.is_alive() => {
                let bucket = (character.hp_ratio() * f64::from(HP_BUCKETS)) as u8;
                let mp_ok = character.skills().iter().any(|skill| skill.can_use(character));
                (bucket.min(HP_BUCKETS - 1), mp_ok)
            }
            _ => (0, false),
        };

        Self {
            floor: battle.floor_index(),
            hp_bucket,
            mp_ok,
            living_enemies: battle.enemies().living_count(),
            boss_alive: battle.boss_alive(),
        }
    }
}

/// What an action does, ignoring whom it targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionCategory {
    Attack,
    Defend,
    Skill(String),
    Pass,
}

impl From<&BattleAction> for ActionCategory {
    fn from(action: &BattleAction) -> Self {
        match action.action_type {
            ActionType::BasicAttack => Self::Attack,
            ActionType::Defend => Self::Defend,
            ActionType::Pass => Self::Pass,
            // A skill-less skill action resolves as a pass.
            ActionType::UseSkill => action
                .skill_name()
                .map_or(Self::Pass, |name| Self::Skill(name.to_owned())),
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => f.write_str("ATTACK"),
            Self::Defend => f.write_str("DEFEND"),
            Self::Skill(name) => write!(f, "SKILL_{name}"),
            Self::Pass => f.write_str("PASS"),
        }
    }
}
