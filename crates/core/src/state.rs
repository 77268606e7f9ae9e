use crate::content::CombatStats;
use crate::grid::{LayerStore, NeighborMask, Positioned};
use crate::types::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Pos,
    pub damage: f64,
    pub health: f64,
    pub max_health: f64,
    pub hit_resistance: f64,
    pub accuracy: f64,
    pub lifesteal: f64,
    pub coins: u32,
    pub kills: u32,
    pub has_key: bool,
}

impl Player {
    pub fn new(stats: CombatStats) -> Self {
        Self {
            pos: Pos::ORIGIN,
            damage: stats.damage,
            health: stats.health,
            max_health: stats.health,
            hit_resistance: stats.hit_resistance,
            accuracy: stats.accuracy,
            lifesteal: 0.0,
            coins: 0,
            kills: 0,
            has_key: false,
        }
    }

    /// Heals up to `max_health`, returning the amount actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        (self.health - before).max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Pos,
    pub kind: EnemyKind,
    pub damage: f64,
    pub health: f64,
    pub hit_resistance: f64,
    pub accuracy: f64,
}

impl Enemy {
    pub fn new(pos: Pos, kind: EnemyKind, stats: CombatStats) -> Self {
        Self {
            pos,
            kind,
            damage: stats.damage,
            health: stats.health,
            hit_resistance: stats.hit_resistance,
            accuracy: stats.accuracy,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wall {
    pub pos: Pos,
    pub kind: WallKind,
    /// Neighbor mask over the completed wall layer.
    pub mask: NeighborMask,
}

impl Wall {
    /// Drawn after the sixteen mask frames of ordinary walls.
    pub const EXIT_VISUAL_INDEX: u8 = 16;

    /// Mask bits `0..=15` for ordinary walls, [`Wall::EXIT_VISUAL_INDEX`] for the exit.
    pub fn visual_index(&self) -> u8 {
        match self.kind {
            WallKind::Ordinary => self.mask.bits(),
            WallKind::Exit => Self::EXIT_VISUAL_INDEX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Floor {
    pub pos: Pos,
    pub variant: FloorVariant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pickup {
    pub pos: Pos,
    pub kind: PickupKind,
}

macro_rules! positioned {
    ($($ty:ty),*) => {
        $(impl Positioned for $ty {
            fn pos(&self) -> Pos {
                self.pos
            }
        })*
    };
}

positioned!(Enemy, Wall, Floor, Pickup);

/// One entity found on a tile, tagged with its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    Floor(EntityId),
    Wall(EntityId),
    Pickup(EntityId),
    Enemy(EntityId),
    Player,
}

impl Occupant {
    pub fn layer(self) -> Layer {
        match self {
            Occupant::Floor(_) => Layer::Floor,
            Occupant::Wall(_) => Layer::Walls,
            Occupant::Pickup(_) => Layer::Pickups,
            Occupant::Enemy(_) => Layer::Enemies,
            Occupant::Player => Layer::Player,
        }
    }
}

/// Read-only view of one entity for a renderer. `variant` picks the frame:
/// wall mask bits or [`Wall::EXIT_VISUAL_INDEX`], floor variant, pickup kind,
/// enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sprite {
    pub layer: Layer,
    pub pos: Pos,
    pub variant: u8,
}

#[derive(Clone, Debug)]
pub struct World {
    pub floor: LayerStore<Floor>,
    pub walls: LayerStore<Wall>,
    pub pickups: LayerStore<Pickup>,
    pub enemies: LayerStore<Enemy>,
    pub player: Player,
}

impl World {
    pub fn new(player: Player) -> Self {
        Self {
            floor: LayerStore::new(),
            walls: LayerStore::new(),
            pickups: LayerStore::new(),
            enemies: LayerStore::new(),
            player,
        }
    }

    /// Every entity on `pos` across `layers`, in the order the layers are given.
    pub fn occupants_at(&self, layers: &[Layer], pos: Pos) -> Vec<Occupant> {
        layers
            .iter()
            .filter_map(|&layer| match layer {
                Layer::Floor => self.floor.id_at(pos).map(Occupant::Floor),
                Layer::Walls => self.walls.id_at(pos).map(Occupant::Wall),
                Layer::Pickups => self.pickups.id_at(pos).map(Occupant::Pickup),
                Layer::Enemies => self.enemies.id_at(pos).map(Occupant::Enemy),
                Layer::Player => (self.player.pos == pos).then_some(Occupant::Player),
            })
            .collect()
    }

    pub fn is_occupied(&self, layer: Layer, pos: Pos) -> bool {
        match layer {
            Layer::Floor => self.floor.contains(pos),
            Layer::Walls => self.walls.contains(pos),
            Layer::Pickups => self.pickups.contains(pos),
            Layer::Enemies => self.enemies.contains(pos),
            Layer::Player => self.player.pos == pos,
        }
    }

    pub fn neighbor_mask(&self, layer: Layer, pos: Pos) -> NeighborMask {
        NeighborMask::from_fn(|neighbor| self.is_occupied(layer, neighbor), pos)
    }

    /// Drops every generated entity. The player is kept.
    pub fn clear_level(&mut self) {
        self.floor.clear();
        self.walls.clear();
        self.pickups.clear();
        self.enemies.clear();
    }

    pub fn exit(&self) -> Option<&Wall> {
        self.walls.iter().map(|(_, wall)| wall).find(|wall| wall.kind == WallKind::Exit)
    }

    pub fn exit_count(&self) -> usize {
        self.walls.iter().filter(|(_, wall)| wall.kind == WallKind::Exit).count()
    }

    pub fn key_count(&self) -> usize {
        self.pickups.iter().filter(|(_, pickup)| pickup.kind == PickupKind::Key).count()
    }

    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(
            self.floor.len() + self.walls.len() + self.pickups.len() + self.enemies.len() + 1,
        );
        sprites.extend(self.floor.iter().map(|(_, floor)| Sprite {
            layer: Layer::Floor,
            pos: floor.pos,
            variant: floor.variant.visual_index(),
        }));
        sprites.extend(self.walls.iter().map(|(_, wall)| Sprite {
            layer: Layer::Walls,
            pos: wall.pos,
            variant: wall.visual_index(),
        }));
        sprites.extend(self.pickups.iter().map(|(_, pickup)| Sprite {
            layer: Layer::Pickups,
            pos: pickup.pos,
            variant: pickup.kind.visual_index(),
        }));
        sprites.extend(self.enemies.iter().map(|(_, enemy)| Sprite {
            layer: Layer::Enemies,
            pos: enemy.pos,
            variant: enemy.kind.index() as u8,
        }));
        sprites.push(Sprite { layer: Layer::Player, pos: self.player.pos, variant: 0 });
        sprites
    }

    /// Stable byte encoding of the level layout for fingerprinting.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.floor.len() as u32).to_le_bytes());
        for (_, floor) in self.floor.iter() {
            bytes.extend(floor.pos.y.to_le_bytes());
            bytes.extend(floor.pos.x.to_le_bytes());
            bytes.push(floor.variant.visual_index());
        }
        bytes.extend((self.walls.len() as u32).to_le_bytes());
        for (_, wall) in self.walls.iter() {
            bytes.extend(wall.pos.y.to_le_bytes());
            bytes.extend(wall.pos.x.to_le_bytes());
            bytes.push(match wall.kind {
                WallKind::Ordinary => wall.mask.bits(),
                WallKind::Exit => 0xFF,
            });
        }
        bytes.extend((self.pickups.len() as u32).to_le_bytes());
        for (_, pickup) in self.pickups.iter() {
            bytes.extend(pickup.pos.y.to_le_bytes());
            bytes.extend(pickup.pos.x.to_le_bytes());
            bytes.push(pickup.kind.visual_index());
        }
        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for (_, enemy) in self.enemies.iter() {
            bytes.extend(enemy.pos.y.to_le_bytes());
            bytes.extend(enemy.pos.x.to_le_bytes());
            bytes.push(enemy.kind.index() as u8);
        }
        bytes
    }
}
