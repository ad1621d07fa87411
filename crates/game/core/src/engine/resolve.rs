//! Applying one decided action to the battle state.

use crate::action::{ActionType, BattleAction};
use crate::event::BattleEvent;
use crate::observation::BattleOutcome;
use crate::state::Team;

use super::{BattlePhase, DungeonBattleEnv};

impl DungeonBattleEnv {
    /// Resolves `action` and logs exactly one event for it.
    ///
    /// Dead or unknown actors do nothing. Heal skills index the actor's own
    /// roster, everything else the opposing one; out-of-range and repeated
    /// indices are dropped before resolution.
    pub(super) fn apply_action(&mut self, action: &BattleAction) {
        let Some(actor) = self.state.character(action.actor) else {
            return;
        };
        if !actor.is_alive() {
            return;
        }
        let actor_name = actor.name().to_owned();
        let actor_stats = *actor.stats();
        let actor_team = actor.team();

        let event = match action.action_type {
            ActionType::BasicAttack => {
                let pool = actor_team.opponent();
                let roster = self.state.roster_mut(pool);
                let target = roster.resolve(&action.targets).first().copied();
                match target.and_then(|slot| roster.get_mut(slot)) {
                    Some(target) => {
                        let damage = target.take_damage(actor_stats.attack);
                        if pool == Team::Players {
                            self.damage_taken += damage;
                        }
                        BattleEvent::Attacked {
                            actor: actor_name,
                            target: target.name().to_owned(),
                            damage,
                            defeated: !target.is_alive(),
                        }
                    }
                    None => BattleEvent::NoTarget { actor: actor_name },
                }
            }
            ActionType::UseSkill => match action.skill.clone() {
                Some(skill) => {
                    debug_assert!(
                        actor.skills().iter().any(|own| own.name() == skill.name()),
                        "{actor_name} does not know {}",
                        skill.name()
                    );
                    let paid = self
                        .state
                        .character_mut(action.actor)
                        .is_some_and(|actor| actor.spend_mp(skill.mp_cost()));
                    if paid {
                        let pool = skill.target_team(actor_team);
                        let roster = self.state.roster_mut(pool);
                        let targets = roster.resolve(&action.targets);
                        let hits = skill.apply(&actor_stats, roster, &targets);
                        if pool == Team::Players && !skill.is_heal() {
                            self.damage_taken += hits.iter().map(|hit| hit.amount).sum::<u32>();
                        }
                        BattleEvent::SkillUsed {
                            actor: actor_name,
                            skill: skill.name().to_owned(),
                            heal: skill.is_heal(),
                            hits,
                        }
                    } else {
                        BattleEvent::NotEnoughMp {
                            actor: actor_name,
                            skill: skill.name().to_owned(),
                            cost: skill.mp_cost(),
                        }
                    }
                }
                None => BattleEvent::Passed { actor: actor_name },
            },
            ActionType::Defend => BattleEvent::Defended { actor: actor_name },
            ActionType::Pass => BattleEvent::Passed { actor: actor_name },
        };
        self.log.push(event);
    }

    /// Ends the battle when a side has no living member left.
    ///
    /// The party is checked first.
    pub(super) fn check_battle_over(&mut self) -> Option<BattleOutcome> {
        let outcome = if !self.state.players().any_alive() {
            BattleOutcome::Defeat
        } else if !self.state.enemies().any_alive() {
            BattleOutcome::Victory
        } else {
            return None;
        };

        self.log.push(match outcome {
            BattleOutcome::Victory => BattleEvent::Victory,
            BattleOutcome::Defeat => BattleEvent::PartyWiped,
        });
        self.phase = BattlePhase::Terminated(outcome);
        Some(outcome)
    }
}
