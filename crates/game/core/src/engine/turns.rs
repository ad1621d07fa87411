use crate::state::{BattleState, CharacterId, Team};

/// Turn scheduling for the battle state.
impl BattleState {
    /// Living actors ordered by speed, fastest first.
    ///
    /// Ties keep the combined players-then-enemies roster order.
    pub fn turn_order(&self) -> Vec<CharacterId> {
        let mut order: Vec<(CharacterId, u32)> = [Team::Players, Team::Enemies]
            .into_iter()
            .flat_map(|team| {
                self.roster(team)
                    .iter()
                    .enumerate()
                    .filter(|(_, member)| member.is_alive())
                    .map(move |(slot, member)| (CharacterId::new(team, slot), member.stats().speed))
            })
            .collect();
        order.sort_by(|(_, a), (_, b)| b.cmp(a));
        order.into_iter().map(|(id, _)| id).collect()
    }
}
