//! Generate the legal actions of one actor.

use crate::action::BattleAction;
use crate::skill::SkillKind;
use crate::state::{BattleState, CharacterId};

/// All actions `actor` may take right now.
///
/// One basic attack per living opponent, then for each affordable skill with at
/// least one valid target either one action per target (single-target attacks,
/// heals) or a single action covering every target (area attacks). Dead or
/// unknown actors get nothing.
pub fn available_actions(battle: &BattleState, actor: CharacterId) -> Vec<BattleAction> {
    let Some(character) = battle.character(actor) else {
        return Vec::new();
    };
    if !character.is_alive() {
        return Vec::new();
    }

    let mut actions: Vec<BattleAction> = battle
        .roster(character.team().opponent())
        .living_slots()
        .map(|slot| BattleAction::basic_attack(actor, slot))
        .collect();

    for skill in character.skills() {
        if !skill.can_use(character) {
            continue;
        }
        let targets = skill.valid_targets(character, battle);
        if targets.is_empty() {
            continue;
        }
        match skill.kind() {
            SkillKind::AreaAttack => {
                actions.push(BattleAction::use_skill(actor, skill.clone(), targets));
            }
            SkillKind::SingleTargetAttack | SkillKind::Heal => {
                actions.extend(
                    targets
                        .into_iter()
                        .map(|slot| BattleAction::use_skill(actor, skill.clone(), vec![slot])),
                );
            }
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionType;
    use crate::ai::EnemyAi;
    use crate::skill::Skill;
    use crate::state::Character;
    use crate::stats::Stats;

    fn battle(players: Vec<Character>, enemies: Vec<Character>) -> BattleState {
        let mut state = BattleState::new(players);
        state.enter_floor(0, "test", false, enemies);
        state
    }

    fn grunt(hp: u32) -> Character {
        Character::enemy("grunt", Stats::new(hp, 0, 1, 0, 1), vec![], EnemyAi::Random)
    }

    #[test]
    fn unaffordable_skills_are_excluded() {
        let kiwi = Character::player(
            "Kiwi",
            Stats::new(100, 5, 10, 0, 10),
            vec![Skill::single_target("cheap", 5, 1).shared(), Skill::area("pricey", 6, 1).shared()],
            "Hero",
        );
        let state = battle(vec![kiwi], vec![grunt(10), grunt(10)]);
        let actions = state.available_actions(CharacterId::player(0));

        assert_eq!(actions.iter().filter(|a| a.action_type == ActionType::BasicAttack).count(), 2);
        assert_eq!(actions.iter().filter(|a| a.skill_name() == Some("cheap")).count(), 2);
        assert!(actions.iter().all(|a| a.skill_name() != Some("pricey")));
    }

    #[test]
    fn area_skill_produces_one_action_over_all_living() {
        let kiwi = Character::player(
            "Kiwi",
            Stats::new(100, 50, 10, 0, 10),
            vec![Skill::area("whirl", 8, 8).shared()],
            "Hero",
        );
        let mut state = battle(vec![kiwi], vec![grunt(10), grunt(10), grunt(10)]);
        state
            .character_mut(CharacterId::enemy(1))
            .expect("enemy in roster")
            .take_damage(50);
        let area: Vec<_> = state
            .available_actions(CharacterId::player(0))
            .into_iter()
            .filter(|a| a.action_type == ActionType::UseSkill)
            .collect();
        assert_eq!(area.len(), 1);
        assert_eq!(area[0].targets, vec![0, 2]);
    }

    #[test]
    fn no_heal_entries_when_party_is_full() {
        let healer = Character::player(
            "Healer Bird",
            Stats::new(80, 100, 6, 5, 12),
            vec![Skill::heal("Holy Light", 6, 35).shared()],
            "Supporter",
        );
        let kiwi = Character::player("Kiwi", Stats::new(150, 80, 18, 8, 14), vec![], "Hero");
        let mut state = battle(vec![kiwi, healer], vec![grunt(10)]);
        let healer_id = CharacterId::player(1);
        assert!(!state.available_actions(healer_id).iter().any(BattleAction::is_heal));

        state
            .character_mut(CharacterId::player(0))
            .expect("kiwi in roster")
            .take_damage(40);
        let heals: Vec<_> = state
            .available_actions(healer_id)
            .into_iter()
            .filter(BattleAction::is_heal)
            .collect();
        assert_eq!(heals.len(), 1);
        assert_eq!(heals[0].targets, vec![0]);
    }

    #[test]
    fn no_offensive_entries_when_enemies_are_dead() {
        let kiwi = Character::player(
            "Kiwi",
            Stats::new(100, 50, 10, 0, 10),
            vec![Skill::single_target("slash", 3, 12).shared()],
            "Hero",
        );
        let mut state = battle(vec![kiwi], vec![grunt(1)]);
        state
            .character_mut(CharacterId::enemy(0))
            .expect("enemy in roster")
            .take_damage(10);
        assert!(state.available_actions(CharacterId::player(0)).is_empty());
    }

    #[test]
    fn dead_actor_has_no_actions() {
        let mut state = battle(vec![Character::player("Kiwi", Stats::new(1, 0, 1, 0, 1), vec![], "Hero")], vec![grunt(5)]);
        state
            .character_mut(CharacterId::player(0))
            .expect("kiwi in roster")
            .take_damage(5);
        assert!(state.available_actions(CharacterId::player(0)).is_empty());
    }
}
