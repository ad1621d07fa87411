use crate::skill::SkillRef;
use crate::state::{CharacterId, Team};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionType {
    BasicAttack,
    UseSkill,
    Defend,
    Pass,
}

/// One decision: who acts, how, and on which roster slots.
///
/// `targets` index the opposing roster, except for heal skills which index the
/// actor's own roster. Indices are checked only when the action is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleAction {
    pub actor: CharacterId,
    pub action_type: ActionType,
    pub targets: Vec<usize>,
    pub skill: Option<SkillRef>,
}

impl BattleAction {
    pub fn basic_attack(actor: CharacterId, target: usize) -> Self {
        Self {
            actor,
            action_type: ActionType::BasicAttack,
            targets: vec![target],
            skill: None,
        }
    }

    pub fn use_skill(actor: CharacterId, skill: SkillRef, targets: Vec<usize>) -> Self {
        Self {
            actor,
            action_type: ActionType::UseSkill,
            targets,
            skill: Some(skill),
        }
    }

    pub fn defend(actor: CharacterId) -> Self {
        Self {
            actor,
            action_type: ActionType::Defend,
            targets: Vec::new(),
            skill: None,
        }
    }

    pub fn pass(actor: CharacterId) -> Self {
        Self {
            actor,
            action_type: ActionType::Pass,
            targets: Vec::new(),
            skill: None,
        }
    }

    pub fn is_heal(&self) -> bool {
        self.action_type == ActionType::UseSkill
            && self.skill.as_ref().is_some_and(|skill| skill.is_heal())
    }

    /// Offensive skill use (single-target or area).
    pub fn is_offensive_skill(&self) -> bool {
        self.action_type == ActionType::UseSkill
            && self.skill.as_ref().is_some_and(|skill| skill.kind().is_offensive())
    }

    /// Roster the target indices refer to.
    pub fn target_team(&self) -> Team {
        if self.is_heal() {
            self.actor.team
        } else {
            self.actor.team.opponent()
        }
    }

    pub fn skill_name(&self) -> Option<&str> {
        self.skill.as_ref().map(|skill| skill.name())
    }
}
