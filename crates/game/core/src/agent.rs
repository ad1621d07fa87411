//! Player decision interface.
//!
//! Agents live outside the battle core. The environment only keeps weak links
//! to them (see [`crate::state::PlayerProfile`]); whoever drives the run owns
//! the [`AgentHandle`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::RngCore;

use crate::action::BattleAction;
use crate::engine::BattleError;
use crate::state::{BattleState, CharacterId};

/// Owning handle to a shared agent.
pub type AgentHandle = Rc<RefCell<dyn Agent>>;

/// Non-owning link stored on player characters.
pub type WeakAgent = Weak<RefCell<dyn Agent>>;

/// Wraps an agent into a shareable handle.
pub fn shared<A: Agent + 'static>(agent: A) -> AgentHandle {
    Rc::new(RefCell::new(agent))
}

/// Feedback delivered to an agent after a step.
#[derive(Clone, Copy, Debug)]
pub struct Transition<'a> {
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    /// State after the step.
    pub battle: &'a BattleState,
    /// Character the agent will act for next, if any remains.
    pub next_actor: Option<CharacterId>,
}

/// Player decision policy.
pub trait Agent {
    /// Chooses an action for `actor`.
    ///
    /// Returning an error aborts the current step.
    fn select_action(
        &mut self,
        battle: &BattleState,
        actor: CharacterId,
        rng: &mut dyn RngCore,
    ) -> Result<BattleAction, BattleError>;

    /// Learning hook; ignored by default.
    fn observe(&mut self, _transition: &Transition<'_>) {}

    /// Short label used in logs.
    fn label(&self) -> &'static str;
}
