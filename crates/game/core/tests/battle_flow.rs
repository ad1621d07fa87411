//! End-to-end battles through the public environment API.

use std::cell::RefCell;
use std::rc::Rc;

use game_core::{
    ActionType, Agent, BattleAction, BattleError, BattleOutcome, BattleState, Character,
    CharacterId, DungeonBattleEnv, DungeonFloorConfig, EnemyAi, FireDragon, Skill, Stats,
};
use rand::RngCore;

fn env(players: Vec<Character>, floors: Vec<DungeonFloorConfig>) -> DungeonBattleEnv {
    DungeonBattleEnv::new(floors, players, 7).expect("valid environment")
}

fn kiwi(max_hp: u32) -> Character {
    Character::player("Kiwi", Stats::new(max_hp, 0, 10, 0, 10), vec![], "Adventurer")
}

/// Attacks the first living enemy.
#[derive(Default)]
struct FirstEnemyAgent;

impl Agent for FirstEnemyAgent {
    fn select_action(
        &mut self,
        battle: &BattleState,
        actor: CharacterId,
        _rng: &mut dyn RngCore,
    ) -> Result<BattleAction, BattleError> {
        battle
            .enemies()
            .first_living()
            .map(|slot| BattleAction::basic_attack(actor, slot))
            .ok_or(BattleError::NoLegalActions { actor })
    }

    fn label(&self) -> &'static str {
        "first-enemy"
    }
}

#[test]
fn killing_the_last_enemy_wins_immediately() {
    let floors = vec![DungeonFloorConfig::new("B1", || {
        vec![Character::enemy("Slime", Stats::new(1, 0, 1, 0, 1), vec![], EnemyAi::Random)]
    })];
    let mut env = env(vec![kiwi(100)], floors);
    env.reset(0).expect("reset");

    let result = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");

    assert!(result.terminated);
    assert!(!result.truncated);
    assert_eq!(result.reward, 100.0);
    assert!(result.reward >= env.config().rewards.victory);
    assert!(result.observation.enemies.iter().all(|enemy| !enemy.alive));
    assert_eq!(result.info.outcome, Some(BattleOutcome::Victory));
    assert!(result.info.ended_on_player_action);
    assert_eq!(
        result.info.log,
        vec![
            "Kiwi attacked Slime for 10 damage. Slime is defeated!".to_owned(),
            "Victory! All enemies defeated.".to_owned(),
        ]
    );
}

#[test]
fn party_wipe_scores_flat_penalty() {
    let floors = vec![DungeonFloorConfig::new("B2", || {
        vec![Character::enemy("Orc", Stats::new(100, 0, 50, 0, 1), vec![], EnemyAi::FocusWeakest)]
    })];
    let mut env = env(vec![kiwi(1)], floors);
    env.reset(0).expect("reset");

    let result = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");

    assert!(result.terminated);
    assert_eq!(result.reward, -100.0);
    assert_eq!(result.info.outcome, Some(BattleOutcome::Defeat));
    assert!(!result.info.ended_on_player_action);
    assert_eq!(result.info.damage_taken, 50);
    assert_eq!(
        result.info.log.last().map(String::as_str),
        Some("Game Over... The party has been wiped out.")
    );
}

#[test]
fn wipe_stops_the_round_before_slower_enemies() {
    let floors = vec![DungeonFloorConfig::new("B3", || {
        vec![
            Character::enemy("Wolf", Stats::new(100, 0, 30, 0, 9), vec![], EnemyAi::FocusWeakest),
            Character::enemy("Snail", Stats::new(100, 0, 5, 0, 2), vec![], EnemyAi::FocusWeakest),
        ]
    })];
    let mut env = env(vec![kiwi(10)], floors);
    env.reset(0).expect("reset");

    let result = env
        .step(BattleAction::defend(CharacterId::player(0)))
        .expect("step");

    assert!(result.terminated);
    assert_eq!(result.info.outcome, Some(BattleOutcome::Defeat));
    assert_eq!(result.info.damage_taken, 30);
    assert_eq!(
        result.info.log,
        vec![
            "Kiwi is defending.".to_owned(),
            "Wolf attacked Kiwi for 30 damage. Kiwi is defeated!".to_owned(),
            "Game Over... The party has been wiped out.".to_owned(),
        ]
    );
    assert!(result.info.log.iter().all(|line| !line.starts_with("Snail")));
}

#[test]
fn victory_stops_the_round_before_slower_actors() {
    let floors = vec![DungeonFloorConfig::new("B1", || {
        vec![
            Character::enemy("Rat", Stats::new(1, 0, 5, 0, 3), vec![], EnemyAi::FocusWeakest),
            Character::enemy("Bat", Stats::new(5, 0, 5, 0, 4), vec![], EnemyAi::FocusWeakest),
        ]
    })];
    let hawk: game_core::AgentHandle = Rc::new(RefCell::new(FirstEnemyAgent));
    let tern: game_core::AgentHandle = Rc::new(RefCell::new(FirstEnemyAgent));
    let party = vec![
        kiwi(100),
        Character::player("Hawk", Stats::new(100, 0, 10, 0, 8), vec![], "Adventurer").with_agent(&hawk),
        Character::player("Tern", Stats::new(100, 0, 10, 0, 1), vec![], "Adventurer").with_agent(&tern),
    ];
    let mut env = env(party, floors);
    env.reset(0).expect("reset");

    let result = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");

    assert!(result.terminated);
    assert_eq!(result.info.outcome, Some(BattleOutcome::Victory));
    assert!(!result.info.ended_on_player_action);
    assert_eq!(result.info.damage_taken, 0);
    assert_eq!(
        result.info.log,
        vec![
            "Kiwi attacked Rat for 10 damage. Rat is defeated!".to_owned(),
            "Hawk attacked Bat for 10 damage. Bat is defeated!".to_owned(),
            "Victory! All enemies defeated.".to_owned(),
        ]
    );
}

#[test]
fn stepping_a_finished_battle_is_an_error() {
    let floors = vec![DungeonFloorConfig::new("B1", || {
        vec![Character::enemy("Slime", Stats::new(1, 0, 1, 0, 1), vec![], EnemyAi::Random)]
    })];
    let mut env = env(vec![kiwi(100)], floors);
    env.reset(0).expect("reset");
    env.step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");

    let again = env.step(BattleAction::pass(CharacterId::player(0)));
    assert_eq!(again.err(), Some(BattleError::AlreadyTerminated { floor: 0 }));

    env.reset(0).expect("reset after termination");
    assert!(!env.is_terminated());
}

#[test]
fn enraged_boss_breathes_on_the_whole_party() {
    let floors = vec![DungeonFloorConfig::boss("Lair", || {
        vec![Character::boss(
            "FireDragon",
            Stats::new(100, 100, 20, 0, 15),
            vec![
                Skill::single_target("Flame Bite", 0, 15).shared(),
                Skill::area("Inferno Breath", 20, 25).shared(),
            ],
            FireDragon::default(),
        )]
    })];
    let squire_agent = Rc::new(RefCell::new(FirstEnemyAgent::default()));
    let handle: game_core::AgentHandle = squire_agent.clone();
    let party = vec![
        Character::player("Kiwi", Stats::new(500, 0, 71, 0, 20), vec![], "Adventurer"),
        Character::player("Squire", Stats::new(500, 0, 1, 0, 1), vec![], "Adventurer")
            .with_agent(&handle),
    ];
    let mut env = env(party, floors);
    env.reset(0).expect("reset");

    // 71 damage leaves the dragon at 29/100 before it acts.
    let result = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");

    let dragon = &env.enemies().as_slice()[0];
    assert_eq!(dragon.mp(), 80);
    let breath = result
        .info
        .log
        .iter()
        .find(|line| line.starts_with("FireDragon used Inferno Breath"))
        .expect("dragon breathed");
    assert!(breath.contains("Kiwi for 45"));
    assert!(breath.contains("Squire for 45"));
    assert_eq!(result.info.damage_taken, 90);
}

#[test]
fn reset_is_idempotent() {
    let floors = game_floors();
    let mut env = env(vec![kiwi(100)], floors);

    let first = env.reset(1).expect("reset");
    env.step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");
    let second = env.reset(1).expect("reset again");

    assert_eq!(first, second);
    assert_eq!(second.turn, 0);
    assert!(second.players.iter().all(|p| p.hp == p.max_hp && p.mp == p.max_mp));
    assert_eq!(env.log().len(), 1);
    assert_eq!(env.damage_taken(), 0);
}

#[test]
fn kills_are_credited_per_step() {
    let floors = vec![DungeonFloorConfig::new("B1", || {
        vec![
            Character::enemy("Rat", Stats::new(5, 0, 1, 0, 1), vec![], EnemyAi::FocusWeakest),
            Character::enemy("Bat", Stats::new(50, 0, 1, 0, 1), vec![], EnemyAi::FocusWeakest),
        ]
    })];
    let mut env = env(vec![kiwi(100)], floors);
    env.reset(0).expect("reset");

    let first = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");
    assert_eq!(first.info.enemies_defeated, 1);
    // one kill, one point of damage from the bat
    assert_eq!(first.reward, 10.0 - 0.05);

    let second = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 1))
        .expect("step");
    assert_eq!(second.info.enemies_defeated, 0);
    assert_eq!(second.info.damage_taken, 2);
}

#[test]
fn out_of_range_targets_are_dropped() {
    let floors = game_floors();
    let mut env = env(vec![kiwi(100)], floors);
    env.reset(0).expect("reset");

    let result = env
        .step(BattleAction {
            actor: CharacterId::player(0),
            action_type: ActionType::BasicAttack,
            targets: vec![7, 1],
            skill: None,
        })
        .expect("step");
    assert_eq!(result.observation.enemies[0].hp, result.observation.enemies[0].max_hp);
    assert!(result.observation.enemies[1].hp < result.observation.enemies[1].max_hp);
}

#[test]
fn dead_lead_action_is_skipped_but_round_runs() {
    let ally = Rc::new(RefCell::new(FirstEnemyAgent::default()));
    let handle: game_core::AgentHandle = ally.clone();
    let floors = vec![DungeonFloorConfig::new("B1", || {
        vec![Character::enemy("Imp", Stats::new(30, 0, 3, 0, 1), vec![], EnemyAi::FocusWeakest)]
    })];
    let party = vec![
        Character::player("Ghost", Stats::new(1, 0, 10, 0, 5), vec![], "Adventurer"),
        Character::player("Kiwi", Stats::new(100, 0, 10, 0, 10), vec![], "Adventurer").with_agent(&handle),
    ];
    let mut env = env(party, floors);
    env.reset(0).expect("reset");

    // Round one kills the ghost (lowest HP), Kiwi keeps fighting.
    env.step(BattleAction::defend(CharacterId::player(0))).expect("step");
    assert!(!env.players().as_slice()[0].is_alive());

    let result = env
        .step(BattleAction::basic_attack(CharacterId::player(0), 0))
        .expect("step");
    assert!(result.info.log.iter().all(|line| !line.starts_with("Ghost")));
    assert!(result.info.log.iter().any(|line| line.starts_with("Kiwi attacked Imp")));
}

fn game_floors() -> Vec<DungeonFloorConfig> {
    vec![
        DungeonFloorConfig::new("Slime Tunnels", || {
            vec![
                Character::enemy("Green Slime", Stats::new(20, 0, 8, 2, 5), vec![], EnemyAi::Random),
                Character::enemy("Goblin", Stats::new(30, 0, 10, 3, 8), vec![], EnemyAi::Random),
            ]
        }),
        DungeonFloorConfig::new("Dark Ritual Hall", || {
            vec![
                Character::enemy("Orc Warrior", Stats::new(60, 0, 15, 8, 7), vec![], EnemyAi::FocusWeakest),
                Character::enemy(
                    "Dark Mage",
                    Stats::new(40, 40, 12, 4, 11),
                    vec![Skill::single_target("Dark Bolt", 5, 12).shared()],
                    EnemyAi::FocusWeakest,
                ),
            ]
        }),
    ]
}
