//! Authoritative battle state.
//!
//! [`BattleState`] owns both rosters plus the floor bookkeeping. Agents and
//! enemy strategies read it; only the environment mutates it.
mod character;
mod ids;
mod roster;

pub use character::{Character, CharacterKind, PlayerProfile};
pub use ids::{CharacterId, Team};
pub use roster::Roster;

use crate::action::BattleAction;

/// Snapshot of one floor's battle.
#[derive(Clone, Debug)]
pub struct BattleState {
    players: Roster,
    enemies: Roster,
    floor_index: usize,
    floor_name: String,
    is_boss_floor: bool,
    turn: u32,
}

impl BattleState {
    /// A state holding the party and no enemies yet.
    pub fn new(players: Vec<Character>) -> Self {
        Self {
            players: Roster::new(Team::Players, players),
            enemies: Roster::empty(Team::Enemies),
            floor_index: 0,
            floor_name: String::new(),
            is_boss_floor: false,
            turn: 0,
        }
    }

    pub const fn players(&self) -> &Roster {
        &self.players
    }

    pub const fn enemies(&self) -> &Roster {
        &self.enemies
    }

    pub const fn roster(&self, team: Team) -> &Roster {
        match team {
            Team::Players => &self.players,
            Team::Enemies => &self.enemies,
        }
    }

    pub(crate) fn roster_mut(&mut self, team: Team) -> &mut Roster {
        match team {
            Team::Players => &mut self.players,
            Team::Enemies => &mut self.enemies,
        }
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.roster(id.team).get(id.slot)
    }

    pub(crate) fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.roster_mut(id.team).get_mut(id.slot)
    }

    pub(crate) fn players_mut(&mut self) -> &mut Roster {
        &mut self.players
    }

    pub const fn floor_index(&self) -> usize {
        self.floor_index
    }

    pub fn floor_name(&self) -> &str {
        &self.floor_name
    }

    pub const fn is_boss_floor(&self) -> bool {
        self.is_boss_floor
    }

    /// Number of completed `step` calls on this floor.
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// True while a boss stands in the enemy roster.
    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(|enemy| enemy.is_boss() && enemy.is_alive())
    }

    pub fn has_boss(&self) -> bool {
        self.enemies.iter().any(Character::is_boss)
    }

    /// First living party member, the one the player controls.
    pub fn lead(&self) -> Option<CharacterId> {
        self.players.first_living().map(CharacterId::player)
    }

    /// Legal actions for `actor`, regenerated from the current state.
    pub fn available_actions(&self, actor: CharacterId) -> Vec<BattleAction> {
        crate::action::available_actions(self, actor)
    }

    /// Replaces the enemy roster and restores the party for a new floor.
    pub(crate) fn enter_floor(
        &mut self,
        floor_index: usize,
        floor_name: &str,
        is_boss_floor: bool,
        enemies: Vec<Character>,
    ) {
        self.enemies = Roster::new(Team::Enemies, enemies);
        self.players.iter_mut().for_each(Character::restore);
        self.floor_index = floor_index;
        self.floor_name = floor_name.to_owned();
        self.is_boss_floor = is_boss_floor;
        self.turn = 0;
    }

    /// Starts a new round: bumps the turn counter and clears `acted` flags.
    pub(crate) fn begin_round(&mut self) {
        self.turn += 1;
        self.players.iter_mut().for_each(Character::clear_acted);
        self.enemies.iter_mut().for_each(Character::clear_acted);
    }
}
