use super::{Character, Team};

/// The characters fighting for one team on the current floor.
///
/// Members keep their slot for the whole floor; the dead stay in place.
#[derive(Clone, Debug)]
pub struct Roster {
    team: Team,
    members: Vec<Character>,
}

impl Roster {
    pub fn new(team: Team, members: Vec<Character>) -> Self {
        debug_assert!(members.iter().all(|member| member.team() == team));
        Self { team, members }
    }

    pub fn empty(team: Team) -> Self {
        Self::new(team, Vec::new())
    }

    pub const fn team(&self) -> Team {
        self.team
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Character> {
        self.members.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Character> {
        self.members.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.members.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.members.iter_mut()
    }

    pub fn as_slice(&self) -> &[Character] {
        &self.members
    }

    /// Slots of living members, in roster order.
    pub fn living_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .map(|(slot, _)| slot)
    }

    pub fn living_count(&self) -> usize {
        self.members.iter().filter(|member| member.is_alive()).count()
    }

    pub fn dead_count(&self) -> usize {
        self.members.len() - self.living_count()
    }

    pub fn any_alive(&self) -> bool {
        self.members.iter().any(Character::is_alive)
    }

    /// Living member with the lowest absolute HP; the earliest slot wins ties.
    pub fn weakest_living(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .min_by_key(|(_, member)| member.hp())
            .map(|(slot, _)| slot)
    }

    pub fn first_living(&self) -> Option<usize> {
        self.living_slots().next()
    }

    /// Keeps only in-range slots, first occurrence of each, preserving order.
    pub fn resolve(&self, indices: &[usize]) -> Vec<usize> {
        let mut slots: Vec<usize> = Vec::with_capacity(indices.len());
        for &slot in indices {
            if slot < self.members.len() && !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        slots
    }
}
