//! Built-in party and three-floor dungeon.
//!
//! | floor | enemies | strategy |
//! |---|---|---|
//! | B1 Slime Tunnels | Green Slime, Goblin | random |
//! | B2 Dark Ritual Hall | Orc Warrior, Dark Mage | focus weakest |
//! | B3 Inferno Dragon's Lair | FireDragon | boss rule |

use game_core::{Character, DungeonFloorConfig, EnemyAi, FireDragon, Skill, Stats};

pub const KIWI: &str = "Kiwi";
pub const HEALER_BIRD: &str = "Healer Bird";

/// Kiwi (attacker) and Healer Bird (supporter), no agents attached yet.
pub fn default_party() -> Vec<Character> {
    let kiwi = Character::player(
        KIWI,
        Stats::new(150, 80, 18, 8, 14),
        vec![
            Skill::single_target("Kiwi Slash", 3, 12).shared(),
            Skill::area("Kiwi Whirlwind", 8, 8).shared(),
        ],
        "Adventurer",
    );
    let healer = Character::player(
        HEALER_BIRD,
        Stats::new(80, 100, 6, 5, 12),
        vec![Skill::heal("Holy Light", 6, 35).shared()],
        "Supporter",
    );
    vec![kiwi, healer]
}

pub fn default_floors() -> Vec<DungeonFloorConfig> {
    vec![slime_tunnels(), dark_ritual_hall(), dragons_lair()]
}

fn slime_tunnels() -> DungeonFloorConfig {
    DungeonFloorConfig::new("Slime Tunnels", || {
        vec![
            Character::enemy("Green Slime", Stats::new(20, 0, 8, 2, 5), vec![], EnemyAi::Random),
            Character::enemy("Goblin", Stats::new(30, 0, 10, 3, 8), vec![], EnemyAi::Random),
        ]
    })
}

fn dark_ritual_hall() -> DungeonFloorConfig {
    let dark_bolt = Skill::single_target("Dark Bolt", 5, 12).shared();
    DungeonFloorConfig::new("Dark Ritual Hall", move || {
        vec![
            Character::enemy(
                "Orc Warrior",
                Stats::new(60, 0, 15, 8, 7),
                vec![],
                EnemyAi::FocusWeakest,
            ),
            Character::enemy(
                "Dark Mage",
                Stats::new(40, 40, 12, 4, 11),
                vec![dark_bolt.clone()],
                EnemyAi::FocusWeakest,
            ),
        ]
    })
}

fn dragons_lair() -> DungeonFloorConfig {
    let flame_bite = Skill::single_target("Flame Bite", 0, 15).shared();
    let inferno_breath = Skill::area("Inferno Breath", 20, 25).shared();
    DungeonFloorConfig::boss("Inferno Dragon's Lair", move || {
        vec![Character::boss(
            "FireDragon",
            Stats::new(250, 100, 20, 10, 15),
            vec![flame_bite.clone(), inferno_breath.clone()],
            FireDragon::default(),
        )]
    })
}
