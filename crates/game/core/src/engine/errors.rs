use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterId;

/// Errors raised by the battle environment and the decision interfaces.
///
/// Only broken preconditions end up here. Empty target sets, dead actors and
/// out-of-range indices are resolved in place.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("{name} ({actor}) has no agent attached")]
    AgentNotAttached { actor: CharacterId, name: String },

    #[error("agent of {name} ({actor}) has been dropped")]
    AgentDropped { actor: CharacterId, name: String },

    #[error("agent of {name} ({actor}) is already deciding")]
    AgentBusy { actor: CharacterId, name: String },

    #[error("no legal actions for {actor}")]
    NoLegalActions { actor: CharacterId },

    #[error("battle has not started; call reset first")]
    NotStarted,

    #[error("battle on floor {floor} already terminated; call reset first")]
    AlreadyTerminated { floor: usize },

    #[error("floor index {index} out of range ({count} floors configured)")]
    UnknownFloor { index: usize, count: usize },

    #[error("no character at {0}")]
    UnknownCharacter(CharacterId),

    #[error("{0} is not a party member")]
    NotAPlayer(CharacterId),

    #[error("environment needs at least one floor")]
    NoFloors,

    #[error("environment needs at least one party member")]
    EmptyParty,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotStarted | Self::AlreadyTerminated { .. } => ErrorSeverity::Recoverable,
            Self::UnknownFloor { .. }
            | Self::UnknownCharacter(_)
            | Self::NotAPlayer(_)
            | Self::NoFloors
            | Self::EmptyParty => ErrorSeverity::Validation,
            Self::AgentBusy { .. } => ErrorSeverity::Internal,
            Self::AgentNotAttached { .. }
            | Self::AgentDropped { .. }
            | Self::NoLegalActions { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AgentNotAttached { .. } => "BATTLE_AGENT_NOT_ATTACHED",
            Self::AgentDropped { .. } => "BATTLE_AGENT_DROPPED",
            Self::AgentBusy { .. } => "BATTLE_AGENT_BUSY",
            Self::NoLegalActions { .. } => "BATTLE_NO_LEGAL_ACTIONS",
            Self::NotStarted => "BATTLE_NOT_STARTED",
            Self::AlreadyTerminated { .. } => "BATTLE_ALREADY_TERMINATED",
            Self::UnknownFloor { .. } => "BATTLE_UNKNOWN_FLOOR",
            Self::UnknownCharacter(_) => "BATTLE_UNKNOWN_CHARACTER",
            Self::NotAPlayer(_) => "BATTLE_NOT_A_PLAYER",
            Self::NoFloors => "BATTLE_NO_FLOORS",
            Self::EmptyParty => "BATTLE_EMPTY_PARTY",
        }
    }
}
