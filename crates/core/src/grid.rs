//! Spatial lookup over integer tile coordinates.
//! Each layer is index-addressed (position -> entity handle) so placement is
//! idempotent and occupancy and neighbor queries are constant-time per tile.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::types::{EntityId, Pos};

/// Occupancy of the four orthogonal neighbors of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborMask {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl NeighborMask {
    /// Only the left and right neighbors are set: a wall inside a horizontal run.
    pub const HORIZONTAL_RUN: NeighborMask =
        NeighborMask { top: false, right: true, bottom: false, left: true };

    pub fn from_fn(mut occupied: impl FnMut(Pos) -> bool, pos: Pos) -> Self {
        let [top, right, bottom, left] = pos.orthogonal_neighbors();
        Self {
            top: occupied(top),
            right: occupied(right),
            bottom: occupied(bottom),
            left: occupied(left),
        }
    }

    /// `top | right << 1 | bottom << 2 | left << 3`, in `0..16`.
    pub fn bits(self) -> u8 {
        u8::from(self.top)
            | u8::from(self.right) << 1
            | u8::from(self.bottom) << 2
            | u8::from(self.left) << 3
    }

    pub fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

/// Distance metric used by the enemy spacing rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFormula {
    /// `dx*dx + dy*dy`.
    #[default]
    Euclidean,
    /// `dx*dx + 2*dy`: linear and signed in `dy`. Kept for parity with
    /// levels produced by the first release of the generator.
    LegacyLinearY,
}

impl DistanceFormula {
    pub fn squared_distance(self, from: Pos, to: Pos) -> i64 {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        match self {
            DistanceFormula::Euclidean => dx * dx + dy * dy,
            DistanceFormula::LegacyLinearY => dx * dx + dy + dy,
        }
    }
}

pub fn squared_distance(from: Pos, to: Pos) -> i64 {
    DistanceFormula::Euclidean.squared_distance(from, to)
}

pub trait Positioned {
    fn pos(&self) -> Pos;
}

/// One layer of entities: at most one entity per tile, iterated in
/// placement order.
#[derive(Clone, Debug)]
pub struct LayerStore<T> {
    entities: SlotMap<EntityId, T>,
    by_pos: HashMap<Pos, EntityId>,
    order: Vec<EntityId>,
}

impl<T> Default for LayerStore<T> {
    fn default() -> Self {
        Self { entities: SlotMap::with_key(), by_pos: HashMap::new(), order: Vec::new() }
    }
}

impl<T: Positioned> LayerStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `entity` unless its tile is already taken in this layer.
    pub fn insert(&mut self, entity: T) -> Option<EntityId> {
        let pos = entity.pos();
        if self.by_pos.contains_key(&pos) {
            return None;
        }
        let id = self.entities.insert(entity);
        self.by_pos.insert(pos, id);
        self.order.push(id);
        Some(id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let entity = self.entities.remove(id)?;
        self.by_pos.remove(&entity.pos());
        self.order.retain(|&other| other != id);
        Some(entity)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.by_pos.clear();
        self.order.clear();
    }

    pub fn id_at(&self, pos: Pos) -> Option<EntityId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn at(&self, pos: Pos) -> Option<&T> {
        self.id_at(pos).and_then(|id| self.entities.get(id))
    }

    pub fn at_mut(&mut self, pos: Pos) -> Option<&mut T> {
        let id = self.id_at(pos)?;
        self.entities.get_mut(id)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.by_pos.contains_key(&pos)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Placement order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.order.iter().filter_map(|&id| self.entities.get(id).map(|entity| (id, entity)))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.iter().map(|(_, entity)| entity.pos())
    }

    pub fn last_id(&self) -> Option<EntityId> {
        self.order.last().copied()
    }

    pub fn neighbor_mask(&self, pos: Pos) -> NeighborMask {
        NeighborMask::from_fn(|neighbor| self.contains(neighbor), pos)
    }
}
