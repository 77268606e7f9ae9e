//! Summary of one generated level.

use crate::types::Pos;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelReport {
    pub stage: u32,
    /// Distinct tiles visited by the walker.
    pub carved_tiles: usize,
    /// Floor tiles after corner backfill.
    pub floor_tiles: usize,
    pub walls: usize,
    pub exit: Option<Pos>,
    pub coins: usize,
    pub key: Option<Pos>,
    pub enemies: usize,
    pub corner_floors: usize,
}
