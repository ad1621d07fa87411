//! Heuristic rules, one node per rule.
//!
//! Each node inspects the context and, when its rule applies, stores the
//! chosen action and succeeds.

use game_core::Character;
use tracing::debug;

use super::context::DecisionContext;
use super::tree::{Behavior, Status};

/// HP ratio under which an ally counts as critical.
pub const CRITICAL_HP_RATIO: f64 = 0.3;

/// Heals the most wounded living ally below [`CRITICAL_HP_RATIO`].
pub struct HealCriticalAlly;

impl Behavior<DecisionContext<'_>> for HealCriticalAlly {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let players = ctx.battle.players();
        let critical = |slot: usize| {
            players
                .get(slot)
                .filter(|ally| ally.is_alive() && ally.hp_ratio() < CRITICAL_HP_RATIO)
                .map(Character::hp_ratio)
        };

        let pick = ctx
            .actions()
            .iter()
            .filter(|action| action.is_heal())
            .filter_map(|action| {
                let slot = *action.targets.first()?;
                critical(slot).map(|ratio| (ratio, action))
            })
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, action)| action.clone());

        match pick {
            Some(action) => {
                debug!(actor = %ctx.actor, target = ?action.targets, "healing critical ally");
                ctx.choose(action);
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// On boss floors, hits enemy slot 0.
pub struct FocusBoss;

impl Behavior<DecisionContext<'_>> for FocusBoss {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        if !ctx.battle.is_boss_floor() {
            return Status::Failure;
        }
        match ctx.strike_on(0) {
            Some(action) => {
                debug!(actor = %ctx.actor, skill = ?action.skill_name(), "focusing boss");
                ctx.choose(action);
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Hits the living enemy with the lowest HP.
pub struct FocusWeakestEnemy;

impl Behavior<DecisionContext<'_>> for FocusWeakestEnemy {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let Some(slot) = ctx.battle.enemies().weakest_living() else {
            return Status::Failure;
        };
        match ctx.strike_on(slot) {
            Some(action) => {
                debug!(actor = %ctx.actor, slot, skill = ?action.skill_name(), "focusing weakest");
                ctx.choose(action);
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Any legal action, uniformly.
pub struct RandomFallback;

impl Behavior<DecisionContext<'_>> for RandomFallback {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        match ctx.random_action() {
            Some(action) => {
                debug!(actor = %ctx.actor, "falling back to random action");
                ctx.choose(action);
                Status::Success
            }
            None => Status::Failure,
        }
    }
}
