//! Procedural level generation: random-walk carving, wall synthesis, exit
//! selection, and constrained spawning.

pub mod model;
pub mod walker;

mod generator;
mod spawns;
mod walls;

pub use generator::DungeonGenerator;
pub use model::LevelReport;
pub use walker::Walker;
