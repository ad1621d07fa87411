//! Blackboard shared by the heuristic rules.

use game_core::{ActionType, BattleAction, BattleState, CharacterId, available_actions};
use rand::RngCore;
use rand::seq::SliceRandom;

/// Read access to the battle plus the legal actions of the deciding player.
///
/// Legal actions are computed once per decision and reused by every rule. The
/// first rule that succeeds stores its pick in `chosen`.
pub struct DecisionContext<'a> {
    pub battle: &'a BattleState,
    pub actor: CharacterId,
    pub rng: &'a mut dyn RngCore,
    actions: Vec<BattleAction>,
    chosen: Option<BattleAction>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(battle: &'a BattleState, actor: CharacterId, rng: &'a mut dyn RngCore) -> Self {
        Self {
            battle,
            actor,
            rng,
            actions: available_actions(battle, actor),
            chosen: None,
        }
    }

    pub fn actions(&self) -> &[BattleAction] {
        &self.actions
    }

    pub fn choose(&mut self, action: BattleAction) {
        self.chosen = Some(action);
    }

    pub fn into_chosen(self) -> Option<BattleAction> {
        self.chosen
    }

    pub fn random_action(&mut self) -> Option<BattleAction> {
        self.actions.choose(&mut *self.rng).cloned()
    }

    /// Offensive action hitting enemy `slot`, skills ahead of basic attacks.
    pub fn strike_on(&self, slot: usize) -> Option<BattleAction> {
        let hits = |action: &&BattleAction| action.targets.contains(&slot);
        self.actions
            .iter()
            .filter(|action| action.is_offensive_skill())
            .find(hits)
            .or_else(|| {
                self.actions
                    .iter()
                    .filter(|action| action.action_type == ActionType::BasicAttack)
                    .find(hits)
            })
            .cloned()
    }
}
