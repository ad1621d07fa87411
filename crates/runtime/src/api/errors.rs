//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the battle core, agent construction and Q-table
//! persistence so clients can bubble them up with consistent context.
use std::path::PathBuf;

use game_core::BattleError;
use thiserror::Error;

use crate::providers::AgentKind;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("lead agent is already borrowed")]
    LeadAgentBusy,

    #[error("unknown agent kind '{0}' (expected heuristic, random or qlearning)")]
    UnknownAgentKind(String),

    #[error("{kind} agent cannot be trained")]
    NotTrainable { kind: AgentKind },

    #[error("training requires at least one episode")]
    NoEpisodes,

    #[error("failed to load content from {path}: {message}")]
    Content { path: PathBuf, message: String },

    #[error("failed to access Q-table at {path}")]
    QTableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed Q-table at {path}")]
    QTableFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
