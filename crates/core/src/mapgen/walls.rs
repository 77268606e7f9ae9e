//! Wall ring synthesis, neighbor masks, and exit selection.

use crate::grid::NeighborMask;
use crate::state::{Wall, World};
use crate::types::{EntityId, Layer, Pos, WallKind};

/// Surrounds every floor tile with walls on each free tile of its 3x3 ring.
/// Returns the new walls that touch a floor tile orthogonally, in creation order.
pub(super) fn synthesize_walls(world: &mut World) -> Vec<Pos> {
    let floors: Vec<Pos> = world.floor.positions().collect();
    let mut corner_floors = Vec::new();

    for floor in floors {
        for pos in floor.ring() {
            if world.floor.contains(pos) || world.walls.contains(pos) {
                continue;
            }
            world.walls.insert(Wall { pos, kind: WallKind::Ordinary, mask: NeighborMask::default() });
            if world.neighbor_mask(Layer::Floor, pos).count() > 0 {
                corner_floors.push(pos);
            }
        }
    }

    corner_floors
}

/// Runs over the completed wall layer: stores each wall's mask and turns the
/// first wall sitting in a horizontal run into the exit.
pub(super) fn assign_masks_and_exit(world: &mut World) -> Option<Pos> {
    let masks: Vec<(EntityId, Pos, NeighborMask)> = world
        .walls
        .iter()
        .map(|(id, wall)| (id, wall.pos, world.walls.neighbor_mask(wall.pos)))
        .collect();

    let mut exit = None;
    for (id, pos, mask) in masks {
        let Some(wall) = world.walls.get_mut(id) else {
            continue;
        };
        wall.mask = mask;
        if exit.is_none() && mask == NeighborMask::HORIZONTAL_RUN {
            wall.kind = WallKind::Exit;
            exit = Some(pos);
        }
    }
    exit
}
