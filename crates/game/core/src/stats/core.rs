//! Base combat attributes.

/// Combat attributes of a character.
///
/// A value type: each character holds its own copy, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    /// Higher speed acts earlier within a round.
    pub speed: u32,
}

impl Stats {
    pub const fn new(max_hp: u32, max_mp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            max_hp,
            max_mp,
            attack,
            defense,
            speed,
        }
    }

    /// Damage left after this defender's defense absorbs `raw`.
    ///
    /// Never below 1 for a positive hit.
    pub const fn mitigate(&self, raw: u32) -> u32 {
        let reduced = raw.saturating_sub(self.defense);
        if reduced == 0 { 1 } else { reduced }
    }
}
