//! Skills: named, MP-costed techniques shared across characters.
//!
//! A skill is immutable data plus a [`SkillKind`] tag. The tag decides which
//! roster the skill aims at, which members of that roster are valid targets, and
//! how the effect lands:
//!
//! | kind | roster | valid targets | effect |
//! |---|---|---|---|
//! | `SingleTargetAttack` | opposing | living | `attack + power` on the first target |
//! | `AreaAttack` | opposing | living | `attack + power` on every target |
//! | `Heal` | own | living with `hp < max_hp` | `power` HP on every target |
//!
//! MP is not spent here. The environment deducts the cost before calling
//! [`Skill::apply`], for every skill alike.

use std::rc::Rc;

use crate::state::{BattleState, Character, Roster, Team};
use crate::stats::Stats;

/// Shared, read-only skill handle held by characters and actions.
pub type SkillRef = Rc<Skill>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillKind {
    SingleTargetAttack,
    AreaAttack,
    Heal,
}

impl SkillKind {
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::SingleTargetAttack | Self::AreaAttack)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Skill {
    name: String,
    mp_cost: u32,
    /// Bonus damage for attacks, heal amount for heals.
    power: u32,
    kind: SkillKind,
}

/// One target touched by a skill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillHit {
    pub slot: usize,
    pub target: String,
    pub amount: u32,
    pub defeated: bool,
}

impl Skill {
    pub fn new(name: impl Into<String>, mp_cost: u32, power: u32, kind: SkillKind) -> Self {
        Self {
            name: name.into(),
            mp_cost,
            power,
            kind,
        }
    }

    pub fn single_target(name: impl Into<String>, mp_cost: u32, power: u32) -> Self {
        Self::new(name, mp_cost, power, SkillKind::SingleTargetAttack)
    }

    pub fn area(name: impl Into<String>, mp_cost: u32, power: u32) -> Self {
        Self::new(name, mp_cost, power, SkillKind::AreaAttack)
    }

    pub fn heal(name: impl Into<String>, mp_cost: u32, heal_power: u32) -> Self {
        Self::new(name, mp_cost, heal_power, SkillKind::Heal)
    }

    pub fn shared(self) -> SkillRef {
        Rc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn mp_cost(&self) -> u32 {
        self.mp_cost
    }

    pub const fn power(&self) -> u32 {
        self.power
    }

    pub const fn kind(&self) -> SkillKind {
        self.kind
    }

    pub const fn is_heal(&self) -> bool {
        matches!(self.kind, SkillKind::Heal)
    }

    /// Roster this skill resolves its indices against.
    pub const fn target_team(&self, user_team: Team) -> Team {
        match self.kind {
            SkillKind::Heal => user_team,
            SkillKind::SingleTargetAttack | SkillKind::AreaAttack => user_team.opponent(),
        }
    }

    /// Alive and holding enough MP.
    pub fn can_use(&self, user: &Character) -> bool {
        user.is_alive() && user.mp() >= self.mp_cost
    }

    /// Slots of the target roster this skill may aim at right now.
    pub fn valid_targets(&self, user: &Character, battle: &BattleState) -> Vec<usize> {
        let roster = battle.roster(self.target_team(user.team()));
        match self.kind {
            SkillKind::SingleTargetAttack | SkillKind::AreaAttack => roster.living_slots().collect(),
            SkillKind::Heal => roster
                .iter()
                .enumerate()
                .filter(|(_, member)| member.is_alive() && member.hp() < member.max_hp())
                .map(|(slot, _)| slot)
                .collect(),
        }
    }

    /// Raw damage an attack skill deals before the target's defense.
    pub const fn raw_damage(&self, user: &Stats) -> u32 {
        user.attack.saturating_add(self.power)
    }

    /// Applies the effect to `targets` (already range-checked slots of `roster`).
    ///
    /// Single-target skills only touch the first slot. Members that are already
    /// dead are skipped.
    pub fn apply(&self, user: &Stats, roster: &mut Roster, targets: &[usize]) -> Vec<SkillHit> {
        let affected = match self.kind {
            SkillKind::SingleTargetAttack => &targets[..targets.len().min(1)],
            SkillKind::AreaAttack | SkillKind::Heal => targets,
        };

        let mut hits = Vec::with_capacity(affected.len());
        for &slot in affected {
            let Some(target) = roster.get_mut(slot) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }
            let amount = match self.kind {
                SkillKind::Heal => target.heal(self.power),
                SkillKind::SingleTargetAttack | SkillKind::AreaAttack => {
                    target.take_damage(self.raw_damage(user))
                }
            };
            hits.push(SkillHit {
                slot,
                target: target.name().to_owned(),
                amount,
                defeated: !target.is_alive(),
            });
        }
        hits
    }
}
