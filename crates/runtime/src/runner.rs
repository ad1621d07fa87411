//! Full dungeon runs: every floor in order until the party falls or the last
//! floor is cleared.
//!
//! The lead agent decides for the first living party member each step and
//! receives the resulting [`Transition`]. The ally agent is attached to every
//! party member and only acts for the others inside `step`.

use game_core::{
    AgentHandle, BattleError, BattleOutcome, DungeonBattleEnv, StepResult, Transition,
};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every floor cleared.
    Cleared,
    /// Party wiped out on `floor`.
    Defeated { floor: usize },
    /// Turn limit reached on `floor`.
    Truncated { floor: usize },
}

impl RunOutcome {
    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub total_reward: f64,
    pub floors_cleared: usize,
    /// Steps taken across all floors.
    pub turns: u32,
    pub outcome: RunOutcome,
}

/// Callbacks fired while a run progresses.
pub trait RunObserver {
    /// After `reset` entered a floor.
    fn on_floor(&mut self, _env: &mut DungeonBattleEnv) {}

    /// After each step.
    fn on_step(&mut self, _env: &mut DungeonBattleEnv, _result: &StepResult) {}
}

impl RunObserver for () {}

/// Drives one environment through its floors.
pub struct DungeonRun {
    lead: AgentHandle,
    ally: AgentHandle,
}

impl DungeonRun {
    pub fn new(lead: AgentHandle, ally: AgentHandle) -> Self {
        Self { lead, ally }
    }

    /// Same agent for the lead and the allies.
    ///
    /// Suited to stateless agents; a learning agent should not also act for
    /// allies since it only tracks its own last choice.
    pub fn solo(agent: AgentHandle) -> Self {
        Self {
            ally: agent.clone(),
            lead: agent,
        }
    }

    pub fn lead(&self) -> &AgentHandle {
        &self.lead
    }

    pub fn run(&self, env: &mut DungeonBattleEnv) -> Result<RunReport> {
        self.run_with(env, &mut ())
    }

    pub fn run_with(
        &self,
        env: &mut DungeonBattleEnv,
        observer: &mut dyn RunObserver,
    ) -> Result<RunReport> {
        for slot in 0..env.players().len() {
            env.attach_agent(slot, &self.ally)?;
        }

        let mut total_reward = 0.0;
        let mut turns = 0;
        let mut floors_cleared = 0;

        for floor in 0..env.floor_count() {
            env.reset(floor)?;
            info!(floor = floor + 1, name = env.state().floor_name(), "entering floor");
            observer.on_floor(env);

            loop {
                let result = self.play_turn(env)?;
                total_reward += result.reward;
                turns += 1;
                observer.on_step(env, &result);

                match result.info.outcome {
                    Some(BattleOutcome::Victory) => {
                        floors_cleared += 1;
                        info!(floor = floor + 1, turn = env.state().turn(), "floor cleared");
                        break;
                    }
                    Some(BattleOutcome::Defeat) => {
                        info!(floor = floor + 1, total_reward, "party defeated");
                        return Ok(RunReport {
                            total_reward,
                            floors_cleared,
                            turns,
                            outcome: RunOutcome::Defeated { floor },
                        });
                    }
                    None if result.truncated => {
                        info!(floor = floor + 1, turn = env.state().turn(), "turn limit reached");
                        return Ok(RunReport {
                            total_reward,
                            floors_cleared,
                            turns,
                            outcome: RunOutcome::Truncated { floor },
                        });
                    }
                    None => {}
                }
            }
        }

        info!(floors_cleared, total_reward, turns, "dungeon cleared");
        Ok(RunReport {
            total_reward,
            floors_cleared,
            turns,
            outcome: RunOutcome::Cleared,
        })
    }

    /// Lead decision, one environment step, then feedback to the lead.
    fn play_turn(&self, env: &mut DungeonBattleEnv) -> Result<StepResult> {
        let actor = env.state().lead().ok_or(BattleError::EmptyParty)?;
        let action = {
            let mut agent = self
                .lead
                .try_borrow_mut()
                .map_err(|_| RuntimeError::LeadAgentBusy)?;
            env.decide_with(&mut *agent, actor)?
        };
        debug!(%actor, action = ?action.action_type, targets = ?action.targets, "lead action");

        let result = env.step(action)?;
        let next_actor = if result.terminated {
            None
        } else {
            env.state().lead()
        };

        self.lead
            .try_borrow_mut()
            .map_err(|_| RuntimeError::LeadAgentBusy)?
            .observe(&Transition {
                reward: result.reward,
                terminated: result.terminated,
                truncated: result.truncated,
                battle: env.state(),
                next_actor,
            });
        Ok(result)
    }
}
