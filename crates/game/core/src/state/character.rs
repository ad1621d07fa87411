use core::fmt;
use std::rc::Rc;

use rand::RngCore;

use crate::action::BattleAction;
use crate::agent::{AgentHandle, WeakAgent};
use crate::ai::{EnemyAi, FireDragon};
use crate::engine::BattleError;
use crate::skill::SkillRef;
use crate::stats::{ResourceMeter, Stats};

use super::{BattleState, CharacterId, Team};

/// Player-side data: a role label and a non-owning link to the agent that
/// decides for this character.
#[derive(Clone, Default)]
pub struct PlayerProfile {
    pub role: String,
    agent: Option<WeakAgent>,
}

impl PlayerProfile {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            agent: None,
        }
    }

    pub fn agent(&self) -> Option<&WeakAgent> {
        self.agent.as_ref()
    }

    pub fn attach(&mut self, agent: &AgentHandle) {
        self.agent = Some(Rc::downgrade(agent));
    }
}

impl fmt::Debug for PlayerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerProfile")
            .field("role", &self.role)
            .field("agent_attached", &self.agent.is_some())
            .finish()
    }
}

/// Who makes this character's decisions.
#[derive(Clone, Debug)]
pub enum CharacterKind {
    Player(PlayerProfile),
    Enemy(EnemyAi),
    Boss(FireDragon),
}

impl CharacterKind {
    pub const fn team(&self) -> Team {
        match self {
            Self::Player(_) => Team::Players,
            Self::Enemy(_) | Self::Boss(_) => Team::Enemies,
        }
    }
}

/// A combatant: stats, HP/MP pools, skills and a decision source.
#[derive(Clone, Debug)]
pub struct Character {
    name: String,
    stats: Stats,
    hp: ResourceMeter,
    mp: ResourceMeter,
    skills: Vec<SkillRef>,
    kind: CharacterKind,
    acted: bool,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        stats: Stats,
        skills: Vec<SkillRef>,
        kind: CharacterKind,
    ) -> Self {
        Self {
            name: name.into(),
            stats,
            hp: ResourceMeter::full(stats.max_hp),
            mp: ResourceMeter::full(stats.max_mp),
            skills,
            kind,
            acted: false,
        }
    }

    pub fn player(
        name: impl Into<String>,
        stats: Stats,
        skills: Vec<SkillRef>,
        role: impl Into<String>,
    ) -> Self {
        Self::new(name, stats, skills, CharacterKind::Player(PlayerProfile::new(role)))
    }

    pub fn enemy(name: impl Into<String>, stats: Stats, skills: Vec<SkillRef>, ai: EnemyAi) -> Self {
        Self::new(name, stats, skills, CharacterKind::Enemy(ai))
    }

    pub fn boss(name: impl Into<String>, stats: Stats, skills: Vec<SkillRef>, rule: FireDragon) -> Self {
        Self::new(name, stats, skills, CharacterKind::Boss(rule))
    }

    /// Links a player to its agent (builder form of [`Character::attach_agent`]).
    #[must_use]
    pub fn with_agent(mut self, agent: &AgentHandle) -> Self {
        self.attach_agent(agent);
        self
    }

    /// Links a player to its agent. Returns false for non-player characters.
    pub fn attach_agent(&mut self, agent: &AgentHandle) -> bool {
        match &mut self.kind {
            CharacterKind::Player(profile) => {
                profile.attach(agent);
                true
            }
            CharacterKind::Enemy(_) | CharacterKind::Boss(_) => false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn team(&self) -> Team {
        self.kind.team()
    }

    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    pub const fn kind(&self) -> &CharacterKind {
        &self.kind
    }

    pub fn skills(&self) -> &[SkillRef] {
        &self.skills
    }

    pub const fn hp(&self) -> u32 {
        self.hp.current()
    }

    pub const fn max_hp(&self) -> u32 {
        self.hp.maximum()
    }

    pub const fn mp(&self) -> u32 {
        self.mp.current()
    }

    pub const fn max_mp(&self) -> u32 {
        self.mp.maximum()
    }

    pub fn hp_ratio(&self) -> f64 {
        self.hp.ratio()
    }

    pub const fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub const fn is_boss(&self) -> bool {
        matches!(self.kind, CharacterKind::Boss(_))
    }

    /// Applies a hit of `raw` power, reduced by defense.
    ///
    /// Returns the mitigated damage (at least 1), even when it exceeds the HP
    /// left. Dead targets and zero-power hits are no-ops returning 0.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        if !self.is_alive() || raw == 0 {
            return 0;
        }
        let damage = self.stats.mitigate(raw);
        self.hp.drain(damage);
        damage
    }

    /// Restores up to `amount` HP, returning the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() || amount == 0 {
            return 0;
        }
        self.hp.restore(amount)
    }

    /// Deducts `cost` MP if available; leaves MP untouched otherwise.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp.current() < cost {
            return false;
        }
        self.mp.drain(cost);
        true
    }

    /// Full HP/MP, used when a floor begins.
    pub fn restore(&mut self) {
        self.hp.refill();
        self.mp.refill();
        self.acted = false;
    }

    pub const fn has_acted(&self) -> bool {
        self.acted
    }

    pub(crate) fn mark_acted(&mut self) {
        self.acted = true;
    }

    pub(crate) fn clear_acted(&mut self) {
        self.acted = false;
    }

    /// Asks this character's decision source for an action.
    ///
    /// Dead characters yield `Ok(None)`. Players consult their attached agent,
    /// enemies their AI strategy, the boss its own rule.
    pub fn take_turn(
        &self,
        id: CharacterId,
        battle: &BattleState,
        rng: &mut dyn RngCore,
    ) -> Result<Option<BattleAction>, BattleError> {
        if !self.is_alive() {
            return Ok(None);
        }

        let action = match &self.kind {
            CharacterKind::Player(profile) => {
                let handle = profile.agent().ok_or_else(|| BattleError::AgentNotAttached {
                    actor: id,
                    name: self.name.clone(),
                })?;
                let agent = handle.upgrade().ok_or_else(|| BattleError::AgentDropped {
                    actor: id,
                    name: self.name.clone(),
                })?;
                let mut agent = agent.try_borrow_mut().map_err(|_| BattleError::AgentBusy {
                    actor: id,
                    name: self.name.clone(),
                })?;
                agent.select_action(battle, id, rng)?
            }
            CharacterKind::Enemy(ai) => ai.choose_action(battle, id, rng),
            CharacterKind::Boss(rule) => rule.decide(self, battle, id, rng),
        };
        Ok(Some(action))
    }
}
