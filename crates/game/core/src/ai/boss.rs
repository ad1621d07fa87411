use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::action::BattleAction;
use crate::skill::SkillKind;
use crate::state::{BattleState, Character, CharacterId};

/// HP ratio below which the boss switches to its area skill.
pub const DEFAULT_ENRAGE_THRESHOLD: f64 = 0.3;

/// Chance that a calm boss opens with a single-target skill.
pub const BOSS_SKILL_PROBABILITY: f64 = 0.7;

/// Decision rule of the dragon boss.
///
/// - no living player: PASS
/// - enraged (`hp_ratio < enrage_threshold`) with an affordable area skill:
///   that skill on every living player
/// - otherwise, with [`BOSS_SKILL_PROBABILITY`], an affordable single-target
///   skill on a random living player
/// - otherwise a basic attack on a random living player
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireDragon {
    pub enrage_threshold: f64,
}

impl Default for FireDragon {
    fn default() -> Self {
        Self::new(DEFAULT_ENRAGE_THRESHOLD)
    }
}

impl FireDragon {
    pub const fn new(enrage_threshold: f64) -> Self {
        Self { enrage_threshold }
    }

    pub fn is_enraged(&self, dragon: &Character) -> bool {
        dragon.hp_ratio() < self.enrage_threshold
    }

    pub fn decide(
        &self,
        dragon: &Character,
        battle: &BattleState,
        actor: CharacterId,
        rng: &mut dyn RngCore,
    ) -> BattleAction {
        let targets: Vec<usize> = battle.roster(actor.team.opponent()).living_slots().collect();
        let Some(&fallback_target) = targets.choose(rng) else {
            return BattleAction::pass(actor);
        };

        if self.is_enraged(dragon) {
            let area = dragon
                .skills()
                .iter()
                .find(|skill| skill.kind() == SkillKind::AreaAttack && skill.can_use(dragon));
            if let Some(skill) = area {
                return BattleAction::use_skill(actor, skill.clone(), targets);
            }
        }

        let single: Vec<_> = dragon
            .skills()
            .iter()
            .filter(|skill| skill.kind() == SkillKind::SingleTargetAttack && skill.can_use(dragon))
            .collect();
        if !single.is_empty() && rng.gen_bool(BOSS_SKILL_PROBABILITY) {
            if let (Some(skill), Some(&target)) = (single.choose(rng), targets.choose(rng)) {
                return BattleAction::use_skill(actor, (*skill).clone(), vec![target]);
            }
        }

        BattleAction::basic_attack(actor, fallback_target)
    }
}
