pub mod config;
pub mod content;
pub mod game;
pub mod grid;
pub mod mapgen;
pub mod rng;
pub mod state;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, level_fingerprint, resolve_bump};
pub use grid::{DistanceFormula, LayerStore, NeighborMask};
pub use mapgen::{DungeonGenerator, LevelReport};
pub use rng::{RandomSource, ScriptedRolls};
pub use state::{Enemy, Floor, Occupant, Pickup, Player, Sprite, Wall, World};
pub use types::*;
