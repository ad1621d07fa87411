//! Q-learning training loop.
//!
//! Each episode is a full dungeon run. Exploration starts high and drops after
//! every episode on the agent's own [`QLearningConfig`](crate::providers::QLearningConfig)
//! schedule.

use std::cell::RefCell;
use std::rc::Rc;

use game_core::{AgentHandle, DungeonBattleEnv};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::providers::QLearningAgent;
use crate::runner::{DungeonRun, RunReport};

/// Episodes between progress lines.
const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    pub episodes: usize,
    pub epsilon_start: f64,
    /// Trailing episodes counted by [`TrainingReport::moving_successes`].
    pub success_window: usize,
}

impl TrainingConfig {
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            ..Self::default()
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1_000,
            epsilon_start: 1.0,
            success_window: 100,
        }
    }
}

/// Per-episode results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    pub rewards: Vec<f64>,
    pub successes: Vec<bool>,
    pub final_epsilon: f64,
}

impl TrainingReport {
    pub fn episodes(&self) -> usize {
        self.rewards.len()
    }

    fn record(&mut self, run: &RunReport) {
        self.rewards.push(run.total_reward);
        self.successes.push(run.outcome.is_cleared());
    }

    /// Percentage of episodes that cleared the dungeon.
    pub fn success_rate(&self) -> f64 {
        if self.successes.is_empty() {
            return 0.0;
        }
        let cleared = self.successes.iter().filter(|cleared| **cleared).count();
        cleared as f64 * 100.0 / self.successes.len() as f64
    }

    /// Clears among episodes `t - window ..= t`, for every episode `t`.
    pub fn moving_successes(&self, window: usize) -> Vec<usize> {
        (0..self.successes.len())
            .map(|t| {
                self.successes[t.saturating_sub(window)..=t]
                    .iter()
                    .filter(|cleared| **cleared)
                    .count()
            })
            .collect()
    }

    pub fn mean_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            return 0.0;
        }
        self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
    }
}

/// Trains a Q-learning lead alongside a fixed ally policy.
pub struct Trainer {
    agent: Rc<RefCell<QLearningAgent>>,
    ally: AgentHandle,
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(agent: Rc<RefCell<QLearningAgent>>, ally: AgentHandle, config: TrainingConfig) -> Self {
        Self { agent, ally, config }
    }

    pub fn agent(&self) -> &Rc<RefCell<QLearningAgent>> {
        &self.agent
    }

    pub const fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn train(&self, env: &mut DungeonBattleEnv) -> Result<TrainingReport> {
        if self.config.episodes == 0 {
            return Err(RuntimeError::NoEpisodes);
        }

        {
            let mut agent = self.agent.try_borrow_mut().map_err(|_| RuntimeError::LeadAgentBusy)?;
            agent.set_learning(true);
            agent.set_epsilon(self.config.epsilon_start);
        }

        let lead: AgentHandle = self.agent.clone();
        let run = DungeonRun::new(lead, self.ally.clone());
        let mut report = TrainingReport::default();
        let window = self.config.success_window;

        for episode in 1..=self.config.episodes {
            let result = run.run(env)?;
            report.record(&result);

            let mut agent = self.agent.try_borrow_mut().map_err(|_| RuntimeError::LeadAgentBusy)?;
            agent.forget_pending();
            let epsilon = agent.decay_epsilon();
            agent.set_epsilon(epsilon);
            debug!(episode, reward = result.total_reward, outcome = ?result.outcome, epsilon, "episode done");

            if episode % PROGRESS_EVERY == 0 {
                let recent = report.moving_successes(window).last().copied().unwrap_or(0);
                info!(episode, epsilon, recent_clears = recent, states = agent.table().len(), "training");
            }
        }

        report.final_epsilon = self
            .agent
            .try_borrow()
            .map_err(|_| RuntimeError::LeadAgentBusy)?
            .epsilon();
        info!(
            episodes = report.episodes(),
            success_rate = report.success_rate(),
            final_epsilon = report.final_epsilon,
            "training finished"
        );
        Ok(report)
    }

    /// Greedy runs with learning switched off.
    pub fn evaluate(&self, env: &mut DungeonBattleEnv, episodes: usize) -> Result<TrainingReport> {
        if episodes == 0 {
            return Err(RuntimeError::NoEpisodes);
        }

        let table = self
            .agent
            .try_borrow()
            .map_err(|_| RuntimeError::LeadAgentBusy)?
            .table()
            .clone();
        let lead: AgentHandle = Rc::new(RefCell::new(QLearningAgent::frozen(table)));
        let run = DungeonRun::new(lead, self.ally.clone());

        let mut report = TrainingReport::default();
        for _ in 0..episodes {
            report.record(&run.run(env)?);
        }
        info!(episodes, success_rate = report.success_rate(), "evaluation finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{QLearningConfig, RandomAgent};
    use crate::runner::RunOutcome;
    use game_core::agent::shared;
    use game_core::{Character, DungeonFloorConfig, EnemyAi, Stats};

    fn report(successes: &[bool]) -> TrainingReport {
        let mut report = TrainingReport::default();
        for (episode, cleared) in successes.iter().enumerate() {
            report.record(&RunReport {
                total_reward: episode as f64,
                floors_cleared: 0,
                turns: 1,
                outcome: if *cleared { RunOutcome::Cleared } else { RunOutcome::Defeated { floor: 0 } },
            });
        }
        report
    }

    #[test]
    fn success_rate_is_a_percentage() {
        let report = report(&[true, false, false, true]);
        assert_eq!(report.success_rate(), 50.0);
        assert_eq!(report.mean_reward(), 1.5);
        assert_eq!(TrainingReport::default().success_rate(), 0.0);
    }

    #[test]
    fn moving_successes_include_the_window_edge() {
        let report = report(&[true, true, false, true]);
        assert_eq!(report.moving_successes(1), vec![1, 2, 1, 1]);
        assert_eq!(report.moving_successes(10), vec![1, 2, 2, 3]);
    }

    #[test]
    fn epsilon_follows_the_agent_schedule() {
        let floors = vec![DungeonFloorConfig::new("B1", || {
            vec![Character::enemy("Rat", Stats::new(1, 0, 1, 0, 1), vec![], EnemyAi::Random)]
        })];
        let party = vec![Character::player("Kiwi", Stats::new(50, 0, 10, 0, 5), vec![], "Adventurer")];
        let mut env = DungeonBattleEnv::new(floors, party, 4).unwrap();

        let agent = Rc::new(RefCell::new(QLearningAgent::new(QLearningConfig {
            epsilon_decay: 0.25,
            min_epsilon: 0.4,
            ..QLearningConfig::default()
        })));
        let trainer = Trainer::new(agent.clone(), shared(RandomAgent), TrainingConfig::new(3));

        let report = trainer.train(&mut env).unwrap();
        assert_eq!(report.episodes(), 3);
        // 1.0 -> 0.75 -> 0.5 -> floor
        assert_eq!(report.final_epsilon, 0.4);
        assert_eq!(agent.borrow().epsilon(), 0.4);
    }
}
