//! Coin, key, and enemy placement plus the corner-floor backfill.

use crate::config::{EnemyStatTable, GenerationConfig};
use crate::rng::RandomSource;
use crate::state::{Enemy, Floor, Pickup, World};
use crate::types::{EnemyKind, FloorStyle, FloorVariant, Layer, PickupKind, Pos};

pub(super) struct SpawnContext<'a> {
    pub(super) generation: &'a GenerationConfig,
    pub(super) enemy_stats: &'a EnemyStatTable,
    /// Flat bonus added to every stat of a spawned enemy.
    pub(super) stat_bonus: f64,
}

pub(super) fn place_floor(
    world: &mut World,
    pos: Pos,
    style: FloorStyle,
    rng: &mut impl RandomSource,
) -> bool {
    if world.floor.contains(pos) {
        return false;
    }
    let variant = match style {
        FloorStyle::Fixed(variant) => variant,
        FloorStyle::Random => FloorVariant::PLAIN[rng.below(FloorVariant::PLAIN.len())],
    };
    world.floor.insert(Floor { pos, variant }).is_some()
}

/// Drops coins into dead ends (floor tiles walled on exactly three sides) and
/// turns the last coin placed into the level's key.
pub(super) fn place_coins(
    world: &mut World,
    context: &SpawnContext<'_>,
    rng: &mut impl RandomSource,
) -> (usize, Option<Pos>) {
    let floors: Vec<Pos> = world.floor.positions().collect();
    let mut placed = 0;

    for pos in floors {
        if pos == Pos::ORIGIN || world.neighbor_mask(Layer::Walls, pos).count() != 3 {
            continue;
        }
        if !rng.chance(context.generation.coin_spawn_chance) || world.pickups.contains(pos) {
            continue;
        }
        if world.pickups.insert(Pickup { pos, kind: PickupKind::Coin }).is_some() {
            placed += 1;
        }
    }

    let key = world.pickups.last_id().and_then(|id| world.pickups.get_mut(id)).map(|pickup| {
        pickup.kind = PickupKind::Key;
        pickup.pos
    });
    (placed, key)
}

/// Spawns enemies on interior floor tiles (no wall neighbors), keeping every
/// pair at least `enemy_min_distance_sq` apart.
pub(super) fn place_enemies(
    world: &mut World,
    context: &SpawnContext<'_>,
    rng: &mut impl RandomSource,
) -> usize {
    let floors: Vec<Pos> = world.floor.positions().collect();
    let mut placed = 0;

    for pos in floors {
        if world.neighbor_mask(Layer::Walls, pos).count() != 0 {
            continue;
        }
        if !world.occupants_at(&[Layer::Enemies, Layer::Player, Layer::Pickups], pos).is_empty() {
            continue;
        }
        if !rng.chance(context.generation.enemy_spawn_chance) {
            continue;
        }
        if !respects_spacing(world, context.generation, pos) {
            continue;
        }
        let kind = EnemyKind::ALL[rng.below(EnemyKind::ALL.len())];
        let stats = context.enemy_stats.for_kind(kind).scaled(context.stat_bonus);
        if world.enemies.insert(Enemy::new(pos, kind, stats)).is_some() {
            placed += 1;
        }
    }

    placed
}

fn respects_spacing(world: &World, generation: &GenerationConfig, pos: Pos) -> bool {
    world.enemies.iter().all(|(_, enemy)| {
        generation.distance_formula.squared_distance(pos, enemy.pos)
            >= generation.enemy_min_distance_sq
    })
}

/// Lays a floor tile under each corner candidate wall.
pub(super) fn backfill_corner_floors(
    world: &mut World,
    corner_floors: &[Pos],
    style: FloorStyle,
    rng: &mut impl RandomSource,
) -> usize {
    corner_floors
        .iter()
        .filter(|&&pos| place_floor(world, pos, style, rng))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::test_support::{empty_world, lay_floor, ring_walls};
    use crate::grid::DistanceFormula;
    use crate::rng::ScriptedRolls;
    use crate::types::Direction;

    fn context(config: &GameConfig) -> SpawnContext<'_> {
        SpawnContext {
            generation: &config.generation,
            enemy_stats: &config.enemies,
            stat_bonus: 0.0,
        }
    }

    /// A plus-shaped room: center (0,0) is interior, each arm tip is a dead end.
    fn plus_room(world: &mut World) {
        let mut tiles = vec![Pos::ORIGIN];
        for direction in Direction::ALL {
            let arm = Pos::ORIGIN.step(direction);
            tiles.push(arm);
            tiles.push(arm.step(direction));
        }
        lay_floor(world, &tiles);
        ring_walls(world);
    }

    #[test]
    fn dead_ends_get_coins_and_last_becomes_key() {
        let config = GameConfig::default();
        let mut world = empty_world();
        plus_room(&mut world);

        let (coins, key) = place_coins(&mut world, &context(&config), &mut ScriptedRolls::constant(0.0));

        assert_eq!(coins, 4, "four arm tips are dead ends");
        assert_eq!(world.key_count(), 1);
        let last = world.pickups.iter().last().map(|(_, pickup)| pickup.clone()).expect("pickup");
        assert_eq!(last.kind, PickupKind::Key);
        assert_eq!(key, Some(last.pos));
    }

    #[test]
    fn no_coins_means_no_key() {
        let config = GameConfig::default();
        let mut world = empty_world();
        plus_room(&mut world);

        let (coins, key) =
            place_coins(&mut world, &context(&config), &mut ScriptedRolls::constant(0.99));

        assert_eq!(coins, 0);
        assert_eq!(key, None);
        assert!(world.pickups.is_empty());
    }

    #[test]
    fn origin_never_receives_a_coin() {
        let config = GameConfig::default();
        let mut world = empty_world();
        lay_floor(&mut world, &[Pos::ORIGIN, Pos::new(1, 0)]);
        ring_walls(&mut world);

        place_coins(&mut world, &context(&config), &mut ScriptedRolls::constant(0.0));

        assert!(!world.pickups.contains(Pos::ORIGIN));
        assert!(world.pickups.contains(Pos::new(1, 0)));
    }

    #[test]
    fn enemies_only_spawn_on_interior_tiles_away_from_player() {
        let config = GameConfig::default();
        let mut world = empty_world();
        let mut tiles = Vec::new();
        for y in -3..=3 {
            for x in -3..=3 {
                tiles.push(Pos::new(x, y));
            }
        }
        lay_floor(&mut world, &tiles);
        ring_walls(&mut world);

        place_enemies(&mut world, &context(&config), &mut ScriptedRolls::constant(0.0));

        assert!(!world.enemies.is_empty());
        for (_, enemy) in world.enemies.iter() {
            assert_ne!(enemy.pos, world.player.pos);
            assert_eq!(world.neighbor_mask(Layer::Walls, enemy.pos).count(), 0);
        }
    }

    #[test]
    fn spawned_enemies_keep_minimum_spacing() {
        let config = GameConfig::default();
        let mut world = empty_world();
        let mut tiles = Vec::new();
        for y in -6..=6 {
            for x in -6..=6 {
                tiles.push(Pos::new(x, y));
            }
        }
        lay_floor(&mut world, &tiles);
        ring_walls(&mut world);

        place_enemies(&mut world, &context(&config), &mut ScriptedRolls::constant(0.0));

        let enemies: Vec<Pos> = world.enemies.positions().collect();
        assert!(enemies.len() > 1);
        for (i, a) in enemies.iter().enumerate() {
            for b in &enemies[i + 1..] {
                assert!(DistanceFormula::Euclidean.squared_distance(*a, *b) >= 10);
            }
        }
    }

    #[test]
    fn legacy_formula_rejects_spawns_below_existing_enemies() {
        let mut config = GameConfig::default();
        let mut world = empty_world();
        world.enemies.insert(Enemy::new(
            Pos::new(0, -5),
            EnemyKind::Golem,
            config.enemies.for_kind(EnemyKind::Golem),
        ));
        let candidate = Pos::ORIGIN;

        assert!(respects_spacing(&world, &config.generation, candidate));
        config.generation.distance_formula = DistanceFormula::LegacyLinearY;
        assert!(
            !respects_spacing(&world, &config.generation, candidate),
            "dy = -5 gives a legacy distance of -10"
        );
    }

    #[test]
    fn enemy_stats_include_stage_bonus() {
        let config = GameConfig::default();
        let mut world = empty_world();
        let mut tiles = Vec::new();
        for y in -2..=2 {
            for x in -2..=2 {
                tiles.push(Pos::new(x, y));
            }
        }
        lay_floor(&mut world, &tiles);
        ring_walls(&mut world);
        let context = SpawnContext { stat_bonus: 0.005, ..context(&config) };

        place_enemies(&mut world, &context, &mut ScriptedRolls::constant(0.0));

        let (_, enemy) = world.enemies.iter().next().expect("one enemy");
        assert_eq!(enemy.kind, EnemyKind::Leech);
        assert!((enemy.health - 3.005).abs() < 1e-12);
        assert!((enemy.accuracy - 0.305).abs() < 1e-12);
    }

    #[test]
    fn backfill_skips_tiles_that_already_have_floor() {
        let mut world = empty_world();
        lay_floor(&mut world, &[Pos::ORIGIN]);
        let added = backfill_corner_floors(
            &mut world,
            &[Pos::ORIGIN, Pos::new(1, 0)],
            FloorStyle::Fixed(FloorVariant::Planks),
            &mut ScriptedRolls::constant(0.0),
        );
        assert_eq!(added, 1);
        assert_eq!(world.floor.len(), 2);
    }
}
