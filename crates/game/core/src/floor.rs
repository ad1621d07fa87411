use core::fmt;

use crate::state::Character;

/// Builds a fresh enemy roster each time a floor is entered.
pub type EnemyFactory = Box<dyn Fn() -> Vec<Character>>;

/// One battle encounter of the dungeon.
pub struct DungeonFloorConfig {
    name: String,
    enemy_factory: EnemyFactory,
    is_boss_floor: bool,
}

impl DungeonFloorConfig {
    pub fn new(name: impl Into<String>, enemy_factory: impl Fn() -> Vec<Character> + 'static) -> Self {
        Self {
            name: name.into(),
            enemy_factory: Box::new(enemy_factory),
            is_boss_floor: false,
        }
    }

    pub fn boss(name: impl Into<String>, enemy_factory: impl Fn() -> Vec<Character> + 'static) -> Self {
        Self {
            is_boss_floor: true,
            ..Self::new(name, enemy_factory)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_boss_floor(&self) -> bool {
        self.is_boss_floor
    }

    pub fn spawn_enemies(&self) -> Vec<Character> {
        (self.enemy_factory)()
    }
}

impl fmt::Debug for DungeonFloorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DungeonFloorConfig")
            .field("name", &self.name)
            .field("is_boss_floor", &self.is_boss_floor)
            .finish_non_exhaustive()
    }
}
