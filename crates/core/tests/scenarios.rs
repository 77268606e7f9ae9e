use std::cell::RefCell;
use std::rc::Rc;

use cryptwalk_core::content::PLAYER_BASE_STATS;
use cryptwalk_core::{
    CombatOutcome, Direction, DungeonGenerator, Enemy, EnemyKind, Floor, FloorStyle, FloorVariant,
    Game, GameConfig, GameError, GameEvent, GenerationError, GenerationPhase, Input, LevelPhase,
    NeighborMask, Pickup, PickupKind, Player, Pos, RandomSource, ScriptedRolls, TurnOutcome, Wall,
    WallKind, World, resolve_bump,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

/// Floor from (0,0) to (4,0), ringed by walls, exit north of the origin.
fn corridor() -> World {
    let mut world = World::new(Player::new(PLAYER_BASE_STATS));
    for x in 0..5 {
        world.floor.insert(Floor { pos: Pos::new(x, 0), variant: FloorVariant::Planks });
    }
    for x in -1..=5 {
        for y in [-1, 1] {
            let kind = if (x, y) == (0, -1) { WallKind::Exit } else { WallKind::Ordinary };
            world.walls.insert(Wall { pos: Pos::new(x, y), kind, mask: NeighborMask::default() });
        }
    }
    for x in [-1, 5] {
        world.walls.insert(Wall {
            pos: Pos::new(x, 0),
            kind: WallKind::Ordinary,
            mask: NeighborMask::default(),
        });
    }
    world
}

fn step(game: &mut Game<impl RandomSource>, direction: Direction) -> TurnOutcome {
    game.apply_input(Input::Move(direction)).expect("active level")
}

#[test]
fn minimal_level_from_a_single_step() {
    let mut config = GameConfig::default();
    config.generation.max_steps = 1;
    config.generation.floor_variant = FloorStyle::Fixed(FloorVariant::Planks);
    let mut world = World::new(Player::new(config.player));
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let report = DungeonGenerator::new(&config)
        .generate(&mut world, 0, &mut rng, &mut |_| {})
        .expect("generation");

    assert_eq!(report.carved_tiles, 1);
    assert_eq!(report.walls, 8);
    assert_eq!(report.coins, 0);
    assert_eq!(report.key, None);
    assert_eq!(report.enemies, 0);
    // The wall above the lone tile has walls left and right and nothing else.
    assert_eq!(report.exit, Some(Pos::new(0, -1)));
    assert_eq!(world.exit_count(), 1);
    // The four orthogonal walls are backfilled with floor.
    assert_eq!(report.corner_floors, 4);
    assert_eq!(world.floor.len(), 5);
    assert!(world.floor.iter().all(|(_, floor)| floor.variant == FloorVariant::Planks));
}

#[test]
fn three_certain_hits_kill_a_leech_and_grant_its_bonus() {
    let mut world = corridor();
    let leech = world
        .enemies
        .insert(Enemy::new(Pos::new(1, 0), EnemyKind::Leech, GameConfig::default().enemies.leech))
        .expect("free tile");
    world.player.damage = 1.0;
    world.player.accuracy = 1.0;
    world.player.hit_resistance = 0.0;
    world.player.health = 10.0;
    // Every strike is certain; the leech's 0.3 counter never lands.
    let mut game = Game::with_level(GameConfig::default(), world, ScriptedRolls::constant(0.999));

    for _ in 0..2 {
        assert!(matches!(step(&mut game, Direction::East), TurnOutcome::Bump(_)));
    }
    assert_eq!(game.state().enemies.get(leech).map(|enemy| enemy.health), Some(1.0));

    let TurnOutcome::Bump(outcome) = step(&mut game, Direction::East) else {
        panic!("expected a bump");
    };

    assert!(outcome.enemy_killed);
    assert!(game.state().enemies.is_empty());
    assert_eq!(game.player().kills, 1);
    assert!((game.player().lifesteal - 0.005).abs() < 1e-12);
    assert!((game.player().health - 13.005).abs() < 1e-9);
    assert_eq!(game.player().pos, Pos::ORIGIN);
    assert!(game.events().contains(&GameEvent::EnemySlain { kind: EnemyKind::Leech }));
}

#[test]
fn key_does_not_open_an_ordinary_wall() {
    let mut world = corridor();
    world.pickups.insert(Pickup { pos: Pos::new(1, 0), kind: PickupKind::Key });
    let mut game = Game::with_level(GameConfig::default(), world, ScriptedRolls::constant(0.5));

    step(&mut game, Direction::East);
    assert!(game.player().has_key);

    assert_eq!(step(&mut game, Direction::North), TurnOutcome::Blocked);
    assert_eq!(game.player().pos, Pos::new(1, 0));
    assert_eq!(game.stage(), 1);
    assert_eq!(game.phase(), LevelPhase::Active);
    assert_eq!(game.state().walls.at(Pos::new(1, -1)).map(|wall| wall.kind), Some(WallKind::Ordinary));
}

#[test]
fn exit_with_key_starts_the_next_level() {
    let mut world = corridor();
    world.pickups.insert(Pickup { pos: Pos::new(1, 0), kind: PickupKind::Key });
    world.pickups.insert(Pickup { pos: Pos::new(4, 0), kind: PickupKind::Coin });
    world
        .enemies
        .insert(Enemy::new(Pos::new(3, 0), EnemyKind::Golem, GameConfig::default().enemies.golem));
    let mut game =
        Game::with_level(GameConfig::default(), world, ChaCha8Rng::seed_from_u64(77));
    let phases = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&phases);
    game.set_progress_observer(Box::new(move |phase| sink.borrow_mut().push(phase)));

    step(&mut game, Direction::East);
    step(&mut game, Direction::West);
    assert!(phases.borrow().is_empty());
    let outcome = step(&mut game, Direction::North);

    // The exit turn ran the whole generation pipeline before going Active again.
    assert_eq!(
        *phases.borrow(),
        vec![
            GenerationPhase::Carving,
            GenerationPhase::Walls,
            GenerationPhase::Exit,
            GenerationPhase::Coins,
            GenerationPhase::Enemies,
            GenerationPhase::Backfill,
        ]
    );

    assert_eq!(outcome, TurnOutcome::ExitUsed { stage: 2 });
    assert_eq!(game.stage(), 2);
    assert_eq!(game.phase(), LevelPhase::Active);
    assert_eq!(game.player().pos, Pos::ORIGIN);
    assert!(!game.player().has_key);

    let report = game.level_report();
    assert_eq!(report.stage, 1);
    assert_eq!(game.state().pickups.len(), report.coins);
    assert_eq!(game.state().enemies.len(), report.enemies);
    assert_eq!(game.state().exit_count(), 1);
    assert!(game.events().ends_with(&[
        GameEvent::ExitOpened { stage: 1 },
        GameEvent::LevelGenerated { stage: 1 },
    ]));
}

#[test]
fn exit_enters_generating_and_stays_there_if_generation_fails() {
    let mut world = corridor();
    world.player.has_key = true;
    let mut config = GameConfig::default();
    config.generation.max_steps = 0;
    let mut game = Game::with_level(config, world, ScriptedRolls::constant(0.5));
    assert_eq!(game.phase(), LevelPhase::Active);

    let err = game.apply_input(Input::Move(Direction::North)).expect_err("no floor carved");

    assert_eq!(err, GameError::Generation(GenerationError::NoFloorCarved { max_steps: 0 }));
    assert_eq!(game.phase(), LevelPhase::Generating);
    assert!(game.state().walls.is_empty());
    assert_eq!(
        game.apply_input(Input::Move(Direction::East)),
        Err(GameError::NotActive(LevelPhase::Generating))
    );
}

#[test]
fn hit_chance_at_or_below_zero_never_lands() {
    let mut player = Player::new(PLAYER_BASE_STATS);
    player.hit_resistance = 0.5;
    let mut enemy = Enemy::new(Pos::new(1, 0), EnemyKind::Stalker, GameConfig::default().enemies.stalker);
    enemy.accuracy = 0.1;

    for roll in [0.0, 0.999] {
        let mut rolls = ScriptedRolls::constant(roll);
        let outcome =
            resolve_bump(&mut player, &mut enemy, &GameConfig::default().combat, &mut rolls);
        assert_eq!(outcome.damage_taken, 0.0, "roll={roll}");
    }
    assert_eq!(player.health, PLAYER_BASE_STATS.health);
}

#[test]
fn hit_chance_above_one_always_lands() {
    let mut player = Player::new(PLAYER_BASE_STATS);
    player.accuracy = 0.9;
    let mut enemy = Enemy::new(Pos::new(1, 0), EnemyKind::Golem, GameConfig::default().enemies.golem);
    enemy.hit_resistance = -0.2;
    enemy.accuracy = 0.0;

    for roll in [0.0, 0.999] {
        let mut rolls = ScriptedRolls::constant(roll);
        let outcome =
            resolve_bump(&mut player, &mut enemy, &GameConfig::default().combat, &mut rolls);
        assert_eq!(
            outcome,
            CombatOutcome { damage_dealt: 1.0, ..CombatOutcome::default() },
            "roll={roll}"
        );
    }
    assert_eq!(enemy.health, GameConfig::default().enemies.golem.health - 2.0);
}
