//! Shared fixtures for unit tests across the crate.

use super::*;
use crate::content::{PLAYER_BASE_STATS, default_enemy_stats};
use crate::grid::NeighborMask;
use crate::rng::ScriptedRolls;
use crate::state::{Enemy, Floor, Wall};

pub(crate) fn empty_world() -> World {
    World::new(Player::new(PLAYER_BASE_STATS))
}

pub(crate) fn lay_floor(world: &mut World, tiles: &[Pos]) {
    for &pos in tiles {
        world.floor.insert(Floor { pos, variant: FloorVariant::Planks });
    }
}

/// Walls every free tile of each floor tile's 3x3 ring, masks left unset.
pub(crate) fn ring_walls(world: &mut World) {
    let floors: Vec<Pos> = world.floor.positions().collect();
    for floor in floors {
        for pos in floor.ring() {
            if !world.floor.contains(pos) && !world.walls.contains(pos) {
                world.walls.insert(Wall {
                    pos,
                    kind: WallKind::Ordinary,
                    mask: NeighborMask::default(),
                });
            }
        }
    }
}

/// Five tiles east of the origin, walled in, with the exit directly north of
/// the origin.
pub(crate) fn corridor_with_exit() -> (World, Pos) {
    let mut world = empty_world();
    let tiles: Vec<Pos> = (0..5).map(|x| Pos::new(x, 0)).collect();
    lay_floor(&mut world, &tiles);
    ring_walls(&mut world);
    let exit = Pos::new(0, -1);
    if let Some(wall) = world.walls.at_mut(exit) {
        wall.kind = WallKind::Exit;
    }
    (world, exit)
}

pub(crate) fn place_enemy(world: &mut World, pos: Pos, kind: EnemyKind) -> EntityId {
    let stats = default_enemy_stats(kind);
    world.enemies.insert(Enemy::new(pos, kind, stats)).expect("free tile")
}

pub(crate) fn scripted_game(world: World, rolls: ScriptedRolls) -> Game<ScriptedRolls> {
    Game::with_level(GameConfig::default(), world, rolls)
}
