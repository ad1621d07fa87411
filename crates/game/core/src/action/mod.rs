//! Action domain.
//!
//! - `types`: [`ActionType`] and [`BattleAction`], the ephemeral decision
//!   record passed from a decision source to the environment
//! - `available`: legal action generation for one actor

mod available;
mod types;

pub use available::available_actions;
pub use types::{ActionType, BattleAction};
