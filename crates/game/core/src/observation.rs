//! What `reset` and `step` hand back to callers.

use crate::state::{BattleState, Character, Roster};

/// Public view of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterView {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub alive: bool,
}

impl From<&Character> for CharacterView {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name().to_owned(),
            hp: character.hp(),
            max_hp: character.max_hp(),
            mp: character.mp(),
            max_mp: character.max_mp(),
            alive: character.is_alive(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub floor_index: usize,
    pub floor_name: String,
    pub turn: u32,
    pub players: Vec<CharacterView>,
    pub enemies: Vec<CharacterView>,
}

impl Observation {
    pub fn capture(battle: &BattleState) -> Self {
        fn views(roster: &Roster) -> Vec<CharacterView> {
            roster.iter().map(CharacterView::from).collect()
        }

        Self {
            floor_index: battle.floor_index(),
            floor_name: battle.floor_name().to_owned(),
            turn: battle.turn(),
            players: views(battle.players()),
            enemies: views(battle.enemies()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Diagnostics attached to every step.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    /// Log lines produced by this step.
    pub log: Vec<String>,
    /// Damage the party has taken on this floor so far.
    pub damage_taken: u32,
    pub outcome: Option<BattleOutcome>,
    /// The battle ended on the player's own action.
    pub ended_on_player_action: bool,
    pub enemies_defeated: usize,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}
