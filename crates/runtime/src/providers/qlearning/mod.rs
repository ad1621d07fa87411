//! Tabular Q-learning player.
//!
//! States are coarse [`StateKey`]s, actions are [`ActionCategory`]s. The agent
//! remembers the `(state, category)` it last chose and applies the one-step
//! update when the run driver reports the transition:
//!
//! ```text
//! Q(s,a) <- Q(s,a) + alpha * (r + gamma * max Q(s',.) - Q(s,a))
//! ```
//!
//! `max Q(s',.)` ranges over categories already stored for `s'` and is 0 on
//! terminal transitions.

mod encoder;
mod table;

pub use encoder::{ActionCategory, HP_BUCKETS, StateKey};
pub use table::QTable;

use game_core::{Agent, BattleAction, BattleError, BattleState, CharacterId, Transition, available_actions};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

/// Learning hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningConfig {
    pub alpha: f64,
    pub gamma: f64,
    /// Exploration rate used for selection.
    pub epsilon: f64,
    /// Subtracted from epsilon by [`QLearningAgent::decay_epsilon`].
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
}

impl QLearningConfig {
    pub const DEFAULT_ALPHA: f64 = 0.1;
    pub const DEFAULT_GAMMA: f64 = 0.99;
    pub const DEFAULT_EPSILON: f64 = 0.1;
    pub const DEFAULT_EPSILON_DECAY: f64 = 0.000_14;
    pub const DEFAULT_MIN_EPSILON: f64 = 0.001;
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            gamma: Self::DEFAULT_GAMMA,
            epsilon: Self::DEFAULT_EPSILON,
            epsilon_decay: Self::DEFAULT_EPSILON_DECAY,
            min_epsilon: Self::DEFAULT_MIN_EPSILON,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QLearningAgent {
    config: QLearningConfig,
    table: QTable,
    epsilon: f64,
    learning: bool,
    pending: Option<(StateKey, ActionCategory)>,
}

impl QLearningAgent {
    pub fn new(config: QLearningConfig) -> Self {
        Self {
            epsilon: config.epsilon,
            config,
            table: QTable::new(),
            learning: true,
            pending: None,
        }
    }

    pub fn with_table(mut self, table: QTable) -> Self {
        self.table = table;
        self
    }

    /// Greedy, non-learning copy for evaluation.
    pub fn frozen(table: QTable) -> Self {
        let mut agent = Self::new(QLearningConfig::default()).with_table(table);
        agent.epsilon = 0.0;
        agent.learning = false;
        agent
    }

    pub const fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub const fn table(&self) -> &QTable {
        &self.table
    }

    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    /// Lowers epsilon by the configured step, never below the floor.
    pub fn decay_epsilon(&mut self) -> f64 {
        self.epsilon = (self.epsilon - self.config.epsilon_decay).max(self.config.min_epsilon);
        self.epsilon
    }

    pub fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
    }

    /// Drops the remembered choice, e.g. between episodes.
    pub fn forget_pending(&mut self) {
        self.pending = None;
    }

    /// Best category first, ties broken at random, then a random action of it.
    fn greedy<'a>(
        &self,
        state: &StateKey,
        actions: &'a [BattleAction],
        rng: &mut dyn RngCore,
    ) -> Option<&'a BattleAction> {
        let mut categories: Vec<ActionCategory> = Vec::new();
        for category in actions.iter().map(ActionCategory::from) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        let best = categories
            .iter()
            .map(|category| self.table.value(state, category))
            .reduce(f64::max)?;
        let ties: Vec<&ActionCategory> = categories
            .iter()
            .filter(|category| self.table.value(state, category) == best)
            .collect();
        let category = ties.choose(rng).copied()?;
        let members: Vec<&BattleAction> = actions
            .iter()
            .filter(|action| ActionCategory::from(*action) == *category)
            .collect();
        members.choose(rng).copied()
    }
}

impl Agent for QLearningAgent {
    fn select_action(
        &mut self,
        battle: &BattleState,
        actor: CharacterId,
        rng: &mut dyn RngCore,
    ) -> Result<BattleAction, BattleError> {
        let actions = available_actions(battle, actor);
        let state = StateKey::encode(battle, actor);

        let explore = rng.gen_bool(self.epsilon.clamp(0.0, 1.0));
        let pick = if explore {
            actions.choose(rng)
        } else {
            self.greedy(&state, &actions, rng)
        };
        let action = pick.cloned().ok_or(BattleError::NoLegalActions { actor })?;

        let category = ActionCategory::from(&action);
        debug!(%actor, ?state, %category, explore, "q-learning pick");
        self.pending = Some((state, category));
        Ok(action)
    }

    fn observe(&mut self, transition: &Transition<'_>) {
        let Some((state, category)) = self.pending.take() else {
            return;
        };
        if !self.learning {
            return;
        }

        let next_best = match (transition.terminated, transition.next_actor) {
            (false, Some(next)) => self
                .table
                .best_value(&StateKey::encode(transition.battle, next)),
            _ => 0.0,
        };
        let current = self.table.value(&state, &category);
        let target = transition.reward + self.config.gamma * next_best;
        let updated = current + self.config.alpha * (target - current);
        trace!(?state, %category, current, updated, "q update");
        self.table.set(state, category, updated);
    }

    fn label(&self) -> &'static str {
        "qlearning"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Character, DungeonBattleEnv, DungeonFloorConfig, EnemyAi, Skill, Stats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn env() -> DungeonBattleEnv {
        let floors = vec![DungeonFloorConfig::new("B1", || {
            vec![Character::enemy("Slime", Stats::new(200, 0, 1, 0, 1), vec![], EnemyAi::Random)]
        })];
        let party = vec![Character::player(
            "Kiwi",
            Stats::new(100, 30, 10, 0, 5),
            vec![Skill::single_target("Kiwi Slash", 3, 12).shared()],
            "Adventurer",
        )];
        let mut env = DungeonBattleEnv::new(floors, party, 5).unwrap();
        env.reset(0).unwrap();
        env
    }

    #[test]
    fn greedy_pick_follows_the_table() {
        let mut env = env();
        let lead = CharacterId::player(0);
        let state = StateKey::encode(env.state(), lead);

        let mut table = QTable::new();
        table.set(state, ActionCategory::Skill("Kiwi Slash".into()), 2.0);
        table.set(state, ActionCategory::Attack, 1.0);
        let mut agent = QLearningAgent::frozen(table);

        for _ in 0..10 {
            let action = env.decide_with(&mut agent, lead).unwrap();
            assert_eq!(action.skill_name(), Some("Kiwi Slash"));
        }
    }

    #[test]
    fn unseen_categories_beat_negative_values() {
        let mut env = env();
        let lead = CharacterId::player(0);
        let state = StateKey::encode(env.state(), lead);

        let mut table = QTable::new();
        table.set(state, ActionCategory::Skill("Kiwi Slash".into()), -3.0);
        let mut agent = QLearningAgent::frozen(table);

        let action = env.decide_with(&mut agent, lead).unwrap();
        assert_eq!(ActionCategory::from(&action), ActionCategory::Attack);
    }

    #[test]
    fn observe_applies_one_step_update() {
        let mut env = env();
        let lead = CharacterId::player(0);
        let mut agent = QLearningAgent::new(QLearningConfig {
            epsilon: 0.0,
            ..QLearningConfig::default()
        });

        let action = env.decide_with(&mut agent, lead).unwrap();
        let state = StateKey::encode(env.state(), lead);
        let category = ActionCategory::from(&action);

        let result = env.step(action).unwrap();
        agent.observe(&Transition {
            reward: 10.0,
            terminated: false,
            truncated: result.truncated,
            battle: env.state(),
            next_actor: Some(lead),
        });

        // Empty table: target is the bare reward.
        assert!((agent.table().value(&state, &category) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn terminal_transition_does_not_bootstrap() {
        let mut env = env();
        let lead = CharacterId::player(0);
        let mut agent = QLearningAgent::new(QLearningConfig {
            epsilon: 0.0,
            ..QLearningConfig::default()
        });
        let state = StateKey::encode(env.state(), lead);
        // Seed a large value that a bootstrap from the same state would pick up.
        agent.table.set(state, ActionCategory::Defend, 1_000.0);

        let action = env.decide_with(&mut agent, lead).unwrap();
        agent.observe(&Transition {
            reward: -100.0,
            terminated: true,
            truncated: false,
            battle: env.state(),
            next_actor: Some(lead),
        });

        let value = agent.table().value(&state, &ActionCategory::from(&action));
        assert!((value - -10.0).abs() < 1e-12);
    }

    #[test]
    fn observe_without_pending_choice_is_ignored() {
        let env = env();
        let mut agent = QLearningAgent::new(QLearningConfig::default());
        agent.observe(&Transition {
            reward: 5.0,
            terminated: false,
            truncated: false,
            battle: env.state(),
            next_actor: None,
        });
        assert!(agent.table().is_empty());
    }

    #[test]
    fn epsilon_decays_to_floor() {
        let mut agent = QLearningAgent::new(QLearningConfig {
            epsilon: 0.5,
            epsilon_decay: 0.2,
            min_epsilon: 0.05,
            ..QLearningConfig::default()
        });
        assert!((agent.decay_epsilon() - 0.3).abs() < 1e-12);
        agent.decay_epsilon();
        assert_eq!(agent.decay_epsilon(), 0.05);
    }

    #[test]
    fn ties_are_broken_per_category() {
        let floors = vec![DungeonFloorConfig::new("B1", || {
            (0..4)
                .map(|i| Character::enemy(format!("Rat {i}"), Stats::new(50, 0, 1, 0, 1), vec![], EnemyAi::Random))
                .collect()
        })];
        let party = vec![Character::player(
            "Kiwi",
            Stats::new(100, 30, 10, 0, 5),
            vec![Skill::area("Kiwi Storm", 5, 8).shared()],
            "Adventurer",
        )];
        let mut env = DungeonBattleEnv::new(floors, party, 5).unwrap();
        env.reset(0).unwrap();
        let lead = CharacterId::player(0);

        // Four attacks against one area skill: an action-level tie-break
        // would attack four times out of five.
        let mut agent = QLearningAgent::frozen(QTable::new());
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let attacks = (0..600)
            .filter(|_| {
                let action = agent.select_action(env.state(), lead, &mut rng).unwrap();
                ActionCategory::from(&action) == ActionCategory::Attack
            })
            .count();
        assert!((240..360).contains(&attacks), "attacks = {attacks}");
    }
}
