//! Deterministic turn-based battle rules shared by the runtime and front ends.
//!
//! `game-core` defines the combat model (stats, skills, characters, enemy
//! strategies) and exposes the episodic [`engine::DungeonBattleEnv`]. All state
//! mutation flows through the environment; randomness comes only from the
//! seeded source it owns.
pub mod action;
pub mod agent;
pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod floor;
pub mod observation;
pub mod skill;
pub mod state;
pub mod stats;

pub use action::{ActionType, BattleAction, available_actions};
pub use agent::{Agent, AgentHandle, Transition, WeakAgent};
pub use ai::{BOSS_SKILL_PROBABILITY, DEFAULT_ENRAGE_THRESHOLD, EnemyAi, FireDragon};
pub use config::{BattleConfig, RewardConfig};
pub use engine::{BattleError, BattlePhase, DungeonBattleEnv, StepSummary, shape_reward};
pub use error::{ErrorSeverity, GameError};
pub use event::{BattleEvent, EventLog};
pub use floor::{DungeonFloorConfig, EnemyFactory};
pub use observation::{BattleOutcome, CharacterView, Observation, StepInfo, StepResult};
pub use skill::{Skill, SkillHit, SkillKind, SkillRef};
pub use state::{BattleState, Character, CharacterId, CharacterKind, PlayerProfile, Roster, Team};
pub use stats::{ResourceMeter, Stats};
