//! High-level runtime orchestrator.
//!
//! [`Runtime`] owns the battle environment, the lead agent and the ally
//! agent. Clients build one from a [`RuntimeConfig`], optionally train the
//! Q-learning lead, then play the dungeon.

use std::cell::RefCell;
use std::rc::Rc;

use game_core::{AgentHandle, DungeonBattleEnv, agent::shared};
use tracing::{info, warn};

use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::providers::{AgentKind, HeuristicAgent, QLearningAgent, QLearningConfig, QTable};
use crate::runner::{DungeonRun, RunObserver, RunReport};
use crate::setup::DungeonSetup;
use crate::training::{Trainer, TrainingConfig, TrainingReport};

pub struct Runtime {
    config: RuntimeConfig,
    env: DungeonBattleEnv,
    lead: AgentHandle,
    ally: AgentHandle,
    /// Typed view of `lead` when it is a Q-learning agent.
    learner: Option<Rc<RefCell<QLearningAgent>>>,
}

impl Runtime {
    /// Loads content and builds the configured agents.
    ///
    /// A Q-learning lead starts from the table at `qtable_path` when the file
    /// exists.
    pub fn from_config(config: RuntimeConfig) -> Result<Self> {
        let env = DungeonSetup::from_config(&config)?.into_env(config.seed)?;
        Self::with_env(config, env)
    }

    /// Uses a prepared environment; content settings in `config` are ignored.
    pub fn with_env(config: RuntimeConfig, env: DungeonBattleEnv) -> Result<Self> {
        let ally = shared(HeuristicAgent);
        let (lead, learner) = match config.agent {
            AgentKind::QLearning => {
                let learner = Rc::new(RefCell::new(Self::load_learner(&config)?));
                let lead: AgentHandle = learner.clone();
                (lead, Some(learner))
            }
            kind => (kind.build(), None),
        };
        info!(agent = %config.agent, seed = config.seed, "runtime ready");

        Ok(Self {
            config,
            env,
            lead,
            ally,
            learner,
        })
    }

    fn load_learner(config: &RuntimeConfig) -> Result<QLearningAgent> {
        let agent = QLearningAgent::new(QLearningConfig::default());
        match &config.qtable_path {
            Some(path) if path.exists() => {
                let table = QTable::load(path)?;
                info!(path = %path.display(), states = table.len(), "loaded q-table");
                Ok(agent.with_table(table))
            }
            Some(path) => {
                warn!(path = %path.display(), "q-table not found, starting empty");
                Ok(agent)
            }
            None => Ok(agent),
        }
    }

    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub const fn env(&self) -> &DungeonBattleEnv {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut DungeonBattleEnv {
        &mut self.env
    }

    pub fn lead(&self) -> &AgentHandle {
        &self.lead
    }

    pub fn learner(&self) -> Option<&Rc<RefCell<QLearningAgent>>> {
        self.learner.as_ref()
    }

    /// Trains the Q-learning lead for `episodes` full runs.
    ///
    /// The table is saved to `qtable_path` afterwards when one is configured,
    /// and the agent is left at its final exploration rate.
    pub fn train(&mut self, episodes: usize) -> Result<TrainingReport> {
        let learner = self.learner.clone().ok_or(RuntimeError::NotTrainable {
            kind: self.config.agent,
        })?;
        let trainer = Trainer::new(learner, self.ally.clone(), TrainingConfig::new(episodes));
        let report = trainer.train(&mut self.env)?;
        self.save_qtable()?;
        Ok(report)
    }

    /// Writes the Q-table when the lead learns and a path is configured.
    pub fn save_qtable(&self) -> Result<bool> {
        let (Some(learner), Some(path)) = (&self.learner, &self.config.qtable_path) else {
            return Ok(false);
        };
        let agent = learner.try_borrow().map_err(|_| RuntimeError::LeadAgentBusy)?;
        agent.table().save(path)?;
        info!(path = %path.display(), states = agent.table().len(), "saved q-table");
        Ok(true)
    }

    pub fn run(&mut self) -> Result<RunReport> {
        self.run_with(&mut ())
    }

    /// One full dungeon run, reporting progress to `observer`.
    pub fn run_with(&mut self, observer: &mut dyn RunObserver) -> Result<RunReport> {
        DungeonRun::new(self.lead.clone(), self.ally.clone()).run_with(&mut self.env, observer)
    }
}
