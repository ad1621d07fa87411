use core::fmt;

/// Side of the battle a character fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Team {
    Players,
    Enemies,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Players => Self::Enemies,
            Self::Enemies => Self::Players,
        }
    }
}

/// Stable handle to a roster slot.
///
/// Rosters never reorder or drop members, so an id taken before a death keeps
/// pointing at the same character for the rest of the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId {
    pub team: Team,
    pub slot: usize,
}

impl CharacterId {
    pub const fn new(team: Team, slot: usize) -> Self {
        Self { team, slot }
    }

    pub const fn player(slot: usize) -> Self {
        Self::new(Team::Players, slot)
    }

    pub const fn enemy(slot: usize) -> Self {
        Self::new(Team::Enemies, slot)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.team, self.slot)
    }
}
