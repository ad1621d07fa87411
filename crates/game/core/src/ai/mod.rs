//! Enemy decision policies.
//!
//! Regular enemies carry an [`EnemyAi`] strategy. The boss carries its own
//! [`FireDragon`] rule instead. Both draw randomness only from the source the
//! environment passes in.

mod boss;

pub use boss::{BOSS_SKILL_PROBABILITY, DEFAULT_ENRAGE_THRESHOLD, FireDragon};

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::action::BattleAction;
use crate::state::{BattleState, CharacterId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyAi {
    /// Uniform choice among the legal actions.
    #[default]
    Random,
    /// Basic attack on the living player with the lowest HP.
    FocusWeakest,
}

impl EnemyAi {
    /// Picks an action for `actor`. Falls back to PASS when nothing applies.
    pub fn choose_action(
        self,
        battle: &BattleState,
        actor: CharacterId,
        rng: &mut dyn RngCore,
    ) -> BattleAction {
        match self {
            Self::Random => battle
                .available_actions(actor)
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| BattleAction::pass(actor)),
            Self::FocusWeakest => battle
                .roster(actor.team.opponent())
                .weakest_living()
                .map_or_else(
                    || BattleAction::pass(actor),
                    |slot| BattleAction::basic_attack(actor, slot),
                ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionType;
    use crate::state::Character;
    use crate::stats::Stats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn battle(player_hp: &[u32]) -> BattleState {
        let players = player_hp
            .iter()
            .map(|&hp| Character::player("hero", Stats::new(hp, 0, 5, 0, 5), vec![], "Hero"))
            .collect();
        let mut state = BattleState::new(players);
        state.enter_floor(
            0,
            "test",
            false,
            vec![Character::enemy("Orc", Stats::new(60, 0, 15, 8, 7), vec![], EnemyAi::FocusWeakest)],
        );
        state
    }

    #[test]
    fn focus_weakest_targets_lowest_hp_first_on_ties() {
        let state = battle(&[50, 20, 20]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let action = EnemyAi::FocusWeakest.choose_action(&state, CharacterId::enemy(0), &mut rng);
        assert_eq!(action.action_type, ActionType::BasicAttack);
        assert_eq!(action.targets, vec![1]);
    }

    #[test]
    fn passes_when_no_player_is_alive() {
        let mut state = battle(&[5]);
        state
            .character_mut(CharacterId::player(0))
            .expect("hero in roster")
            .take_damage(100);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for ai in [EnemyAi::Random, EnemyAi::FocusWeakest] {
            let action = ai.choose_action(&state, CharacterId::enemy(0), &mut rng);
            assert_eq!(action.action_type, ActionType::Pass);
        }
    }

    #[test]
    fn random_only_returns_legal_actions() {
        let state = battle(&[10, 10, 10]);
        let legal = state.available_actions(CharacterId::enemy(0));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let action = EnemyAi::Random.choose_action(&state, CharacterId::enemy(0), &mut rng);
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn parses_from_snake_case() {
        assert_eq!("focus_weakest".parse::<EnemyAi>().ok(), Some(EnemyAi::FocusWeakest));
    }
}
