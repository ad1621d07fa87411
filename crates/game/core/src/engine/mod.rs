//! Battle environment: floor setup, turn resolution, termination and reward.
//!
//! [`DungeonBattleEnv`] exposes the episodic `reset` / `step` interface. One
//! `step` resolves the player's action and then every remaining living actor in
//! speed order, so the caller only ever decides for the party lead.
//!
//! ```text
//! AwaitingReset --reset--> InProgress --step (side wiped)--> Terminated
//!                              ^                                  |
//!                              +-------------reset----------------+
//! ```

mod errors;
mod resolve;
mod reward;
mod turns;

pub use errors::BattleError;
pub use reward::{StepSummary, shape_reward};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::action::BattleAction;
use crate::agent::{Agent, AgentHandle};
use crate::config::BattleConfig;
use crate::event::{BattleEvent, EventLog};
use crate::floor::DungeonFloorConfig;
use crate::observation::{BattleOutcome, Observation, StepInfo, StepResult};
use crate::state::{BattleState, Character, CharacterId, Roster, Team};

/// Lifecycle of the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingReset,
    InProgress,
    Terminated(BattleOutcome),
}

pub struct DungeonBattleEnv {
    floors: Vec<DungeonFloorConfig>,
    state: BattleState,
    config: BattleConfig,
    rng: ChaCha8Rng,
    log: EventLog,
    phase: BattlePhase,
    damage_taken: u32,
}

impl DungeonBattleEnv {
    /// Creates an environment over `floors` for the given party.
    ///
    /// The party persists across floors; call [`reset`](Self::reset) to enter
    /// one.
    pub fn new(
        floors: Vec<DungeonFloorConfig>,
        players: Vec<Character>,
        seed: u64,
    ) -> Result<Self, BattleError> {
        if floors.is_empty() {
            return Err(BattleError::NoFloors);
        }
        if players.is_empty() {
            return Err(BattleError::EmptyParty);
        }
        if let Some(slot) = players.iter().position(|member| member.team() != Team::Players) {
            return Err(BattleError::NotAPlayer(CharacterId::player(slot)));
        }

        Ok(Self {
            floors,
            state: BattleState::new(players),
            config: BattleConfig::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            log: EventLog::default(),
            phase: BattlePhase::AwaitingReset,
            damage_taken: 0,
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub const fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn floors(&self) -> &[DungeonFloorConfig] {
        &self.floors
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub const fn current_floor_index(&self) -> usize {
        self.state.floor_index()
    }

    pub fn current_floor(&self) -> Option<&DungeonFloorConfig> {
        match self.phase {
            BattlePhase::AwaitingReset => None,
            BattlePhase::InProgress | BattlePhase::Terminated(_) => {
                self.floors.get(self.state.floor_index())
            }
        }
    }

    pub const fn state(&self) -> &BattleState {
        &self.state
    }

    pub const fn players(&self) -> &Roster {
        self.state.players()
    }

    pub const fn enemies(&self) -> &Roster {
        self.state.enemies()
    }

    pub const fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub const fn is_terminated(&self) -> bool {
        matches!(self.phase, BattlePhase::Terminated(_))
    }

    pub const fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Terminated(outcome) => Some(outcome),
            BattlePhase::AwaitingReset | BattlePhase::InProgress => None,
        }
    }

    /// Party damage taken on the current floor.
    pub const fn damage_taken(&self) -> u32 {
        self.damage_taken
    }

    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Log lines not yet handed out.
    pub fn drain_log(&mut self) -> Vec<String> {
        self.log.drain()
    }

    pub fn observation(&self) -> Observation {
        Observation::capture(&self.state)
    }

    /// Links party member `slot` to `agent` for ally turns.
    pub fn attach_agent(&mut self, slot: usize, agent: &AgentHandle) -> Result<(), BattleError> {
        let id = CharacterId::player(slot);
        let member = self
            .state
            .players_mut()
            .get_mut(slot)
            .ok_or(BattleError::UnknownCharacter(id))?;
        member.attach_agent(agent);
        Ok(())
    }

    /// Enters floor `floor_index` with a fresh enemy roster and a restored party.
    pub fn reset(&mut self, floor_index: usize) -> Result<Observation, BattleError> {
        let floor = self.floors.get(floor_index).ok_or(BattleError::UnknownFloor {
            index: floor_index,
            count: self.floors.len(),
        })?;

        let enemies = floor.spawn_enemies();
        self.state
            .enter_floor(floor_index, floor.name(), floor.is_boss_floor(), enemies);
        self.log.clear();
        self.log.push(BattleEvent::FloorEntered {
            number: floor_index + 1,
            name: floor.name().to_owned(),
        });
        self.phase = BattlePhase::InProgress;
        self.damage_taken = 0;

        Ok(self.observation())
    }

    /// Runs `actor`'s own decision source (agent, AI or boss rule).
    ///
    /// Dead characters answer with PASS.
    pub fn decide(&mut self, actor: CharacterId) -> Result<BattleAction, BattleError> {
        let character = self
            .state
            .character(actor)
            .ok_or(BattleError::UnknownCharacter(actor))?;
        let action = character.take_turn(actor, &self.state, &mut self.rng)?;
        Ok(action.unwrap_or_else(|| BattleAction::pass(actor)))
    }

    /// Asks an external agent to decide for `actor` using the environment's
    /// random source.
    pub fn decide_with(
        &mut self,
        agent: &mut dyn Agent,
        actor: CharacterId,
    ) -> Result<BattleAction, BattleError> {
        agent.select_action(&self.state, actor, &mut self.rng)
    }

    /// Resolves one round: the player's action, then every other living actor
    /// in turn order.
    ///
    /// The acting character must be a party member. A dead actor's action is
    /// skipped, the rest of the round still runs.
    pub fn step(&mut self, action: BattleAction) -> Result<StepResult, BattleError> {
        match self.phase {
            BattlePhase::AwaitingReset => return Err(BattleError::NotStarted),
            BattlePhase::Terminated(_) => {
                return Err(BattleError::AlreadyTerminated {
                    floor: self.state.floor_index(),
                });
            }
            BattlePhase::InProgress => {}
        }
        if action.actor.team != Team::Players {
            return Err(BattleError::NotAPlayer(action.actor));
        }
        if self.state.character(action.actor).is_none() {
            return Err(BattleError::UnknownCharacter(action.actor));
        }

        self.state.begin_round();
        let log_start = self.log.len();
        let dead_before = self.state.enemies().dead_count();

        self.apply_action(&action);
        self.mark_acted(action.actor);

        let mut ended_on_player_action = false;
        let mut outcome = self.check_battle_over();
        if outcome.is_some() {
            ended_on_player_action = true;
        } else {
            for id in self.state.turn_order() {
                let pending = self
                    .state
                    .character(id)
                    .is_some_and(|member| member.is_alive() && !member.has_acted());
                if id == action.actor || !pending {
                    continue;
                }

                let decided = self.decide(id)?;
                self.apply_action(&decided);
                self.mark_acted(id);

                outcome = self.check_battle_over();
                if outcome.is_some() {
                    break;
                }
            }
        }

        let summary = StepSummary {
            enemies_killed: self.state.enemies().dead_count() - dead_before,
            outcome,
            ended_on_player_action,
            boss_in_roster: self.state.has_boss(),
            living_players: self.state.players().living_count(),
            damage_taken: self.damage_taken,
        };
        let reward = shape_reward(&self.config.rewards, &summary);
        let terminated = outcome.is_some();
        let truncated = !terminated
            && self
                .config
                .max_turns
                .is_some_and(|limit| self.state.turn() >= limit);

        Ok(StepResult {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
            info: StepInfo {
                log: self.log.messages_since(log_start),
                damage_taken: self.damage_taken,
                outcome,
                ended_on_player_action,
                enemies_defeated: summary.enemies_killed,
            },
        })
    }

    /// Draws from the environment's random source.
    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }

    fn mark_acted(&mut self, id: CharacterId) {
        if let Some(member) = self.state.character_mut(id) {
            member.mark_acted();
        }
    }
}
