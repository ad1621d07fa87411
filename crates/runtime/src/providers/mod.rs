//! Player decision providers.
//!
//! Every provider implements [`game_core::Agent`]; [`AgentKind`] selects one
//! by name and [`AgentKind::build`] hands back a shareable handle.

pub mod heuristic;
pub mod qlearning;
pub mod random;

use std::fmt;
use std::str::FromStr;

use game_core::AgentHandle;

pub use heuristic::HeuristicAgent;
pub use qlearning::{ActionCategory, QLearningAgent, QLearningConfig, QTable, StateKey};
pub use random::RandomAgent;

use crate::api::RuntimeError;

/// Which provider drives the party lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgentKind {
    #[default]
    Heuristic,
    Random,
    QLearning,
}

impl AgentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Random => "random",
            Self::QLearning => "qlearning",
        }
    }

    /// Builds a fresh provider of this kind.
    ///
    /// Q-learning agents start with an empty table and the default
    /// hyper-parameters.
    pub fn build(self) -> AgentHandle {
        match self {
            Self::Heuristic => game_core::agent::shared(HeuristicAgent),
            Self::Random => game_core::agent::shared(RandomAgent),
            Self::QLearning => {
                game_core::agent::shared(QLearningAgent::new(QLearningConfig::default()))
            }
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = RuntimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(Self::Heuristic),
            "random" => Ok(Self::Random),
            "qlearning" | "q-learning" | "q_learning" => Ok(Self::QLearning),
            _ => Err(RuntimeError::UnknownAgentKind(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("Heuristic".parse::<AgentKind>().unwrap(), AgentKind::Heuristic);
        assert_eq!(" random ".parse::<AgentKind>().unwrap(), AgentKind::Random);
        assert_eq!("q-learning".parse::<AgentKind>().unwrap(), AgentKind::QLearning);
        assert_eq!(AgentKind::QLearning.to_string(), "qlearning");
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "minimax".parse::<AgentKind>().unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownAgentKind(ref name) if name == "minimax"));
    }

    #[test]
    fn built_agents_report_their_label() {
        assert_eq!(AgentKind::Heuristic.build().borrow().label(), "heuristic");
        assert_eq!(AgentKind::Random.build().borrow().label(), "random");
        assert_eq!(AgentKind::QLearning.build().borrow().label(), "qlearning");
    }
}
