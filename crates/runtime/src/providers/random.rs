//! Uniform random player.

use game_core::{Agent, BattleAction, BattleError, BattleState, CharacterId, available_actions};
use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::debug;

/// Picks uniformly among the legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn select_action(
        &mut self,
        battle: &BattleState,
        actor: CharacterId,
        rng: &mut dyn RngCore,
    ) -> Result<BattleAction, BattleError> {
        let actions = available_actions(battle, actor);
        let action = actions
            .choose(rng)
            .cloned()
            .ok_or(BattleError::NoLegalActions { actor })?;
        debug!(%actor, choices = actions.len(), action = ?action.action_type, "random pick");
        Ok(action)
    }

    fn label(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Character, DungeonBattleEnv, DungeonFloorConfig, EnemyAi, Stats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn env() -> DungeonBattleEnv {
        let floors = vec![DungeonFloorConfig::new("B1", || {
            vec![
                Character::enemy("Rat", Stats::new(5, 0, 1, 0, 1), vec![], EnemyAi::Random),
                Character::enemy("Bat", Stats::new(5, 0, 1, 0, 1), vec![], EnemyAi::Random),
            ]
        })];
        let party = vec![Character::player("Kiwi", Stats::new(50, 0, 3, 0, 5), vec![], "Adventurer")];
        DungeonBattleEnv::new(floors, party, 3).unwrap()
    }

    #[test]
    fn picks_a_legal_action() {
        let mut env = env();
        env.reset(0).unwrap();
        let lead = CharacterId::player(0);
        let legal = env.state().available_actions(lead);

        for _ in 0..20 {
            let action = env.decide_with(&mut RandomAgent, lead).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn same_seed_same_picks() {
        let mut env = env();
        env.reset(0).unwrap();
        let lead = CharacterId::player(0);

        let picks = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..16)
                .map(|_| RandomAgent.select_action(env.state(), lead, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(21), picks(21));
    }

    #[test]
    fn errors_without_legal_actions() {
        let mut env = env();
        // Before reset there are no enemies to attack.
        let err = env.decide_with(&mut RandomAgent, CharacterId::player(0)).unwrap_err();
        assert_eq!(err, BattleError::NoLegalActions { actor: CharacterId::player(0) });
    }
}
