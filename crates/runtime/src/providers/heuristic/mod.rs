//! Rule-based player.
//!
//! Rules are evaluated as a [`Selector`]; the first rule that applies picks
//! the action:
//!
//! 1. [`HealCriticalAlly`]: heal a living ally under 30% HP.
//! 2. [`FocusBoss`]: on boss floors, hit enemy slot 0.
//! 3. [`FocusWeakestEnemy`]: hit the living enemy with the lowest HP.
//! 4. [`RandomFallback`]: any legal action.
//!
//! Rules 2 and 3 prefer an offensive skill over a basic attack on the same
//! target.

mod context;
mod nodes;
mod tree;

pub use context::DecisionContext;
pub use nodes::{CRITICAL_HP_RATIO, FocusBoss, FocusWeakestEnemy, HealCriticalAlly, RandomFallback};
pub use tree::{Behavior, Selector, Status};

use game_core::{Agent, BattleAction, BattleError, BattleState, CharacterId};
use rand::RngCore;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAgent;

impl HeuristicAgent {
    fn rules<'a>() -> Selector<DecisionContext<'a>> {
        Selector::new(vec![
            Box::new(HealCriticalAlly),
            Box::new(FocusBoss),
            Box::new(FocusWeakestEnemy),
            Box::new(RandomFallback),
        ])
    }
}

impl Agent for HeuristicAgent {
    fn select_action(
        &mut self,
        battle: &BattleState,
        actor: CharacterId,
        rng: &mut dyn RngCore,
    ) -> Result<BattleAction, BattleError> {
        let mut ctx = DecisionContext::new(battle, actor, rng);
        if ctx.actions().is_empty() {
            return Err(BattleError::NoLegalActions { actor });
        }

        Self::rules().tick(&mut ctx);
        ctx.into_chosen().ok_or(BattleError::NoLegalActions { actor })
    }

    fn label(&self) -> &'static str {
        "heuristic"
    }
}
