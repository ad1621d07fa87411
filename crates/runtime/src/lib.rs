//! Agents and run orchestration on top of the battle core.
//!
//! Modules are organized by responsibility:
//! - [`providers`] implements the player agents (random, heuristic, Q-learning)
//! - [`runner`] drives a party through every floor of a dungeon
//! - [`training`] repeats runs to train the Q-learning agent
//! - [`runtime`] ties content, agents and the environment together
//! - [`api`] exposes the error types downstream clients interact with
pub mod api;
pub mod config;
pub mod providers;
pub mod runner;
pub mod runtime;
pub mod setup;
pub mod training;

pub use api::{Result, RuntimeError};
pub use config::RuntimeConfig;
pub use providers::{
    ActionCategory, AgentKind, HeuristicAgent, QLearningAgent, QLearningConfig, QTable,
    RandomAgent, StateKey,
};
pub use runner::{DungeonRun, RunObserver, RunOutcome, RunReport};
pub use runtime::Runtime;
pub use setup::DungeonSetup;
pub use training::{Trainer, TrainingConfig, TrainingReport};
