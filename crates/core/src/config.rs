//! Tunable generation, combat, and scoring parameters.
//! Every section defaults independently, so a config file only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{CombatStats, KillBonusTable, default_enemy_stats};
use crate::grid::DistanceFormula;
use crate::types::{EnemyKind, FloorStyle, FloorVariant};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("`{field}` = {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub player: CombatStats,
    pub enemies: EnemyStatTable,
    pub combat: CombatConfig,
    pub score: ScoreWeights,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_steps: u32,
    pub walker_turn_chance: f64,
    /// A fixed variant name, or `"random"` for a plain variant per tile.
    pub floor_variant: FloorStyle,
    pub coin_spawn_chance: f64,
    pub enemy_spawn_chance: f64,
    pub enemy_min_distance_sq: i64,
    pub distance_formula: DistanceFormula,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            walker_turn_chance: 1.0,
            floor_variant: FloorStyle::Fixed(FloorVariant::Planks),
            coin_spawn_chance: 0.75,
            enemy_spawn_chance: 0.1,
            enemy_min_distance_sq: 10,
            distance_formula: DistanceFormula::Euclidean,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStatTable {
    pub leech: CombatStats,
    pub stalker: CombatStats,
    pub brute: CombatStats,
    pub golem: CombatStats,
}

impl Default for EnemyStatTable {
    fn default() -> Self {
        Self {
            leech: default_enemy_stats(EnemyKind::Leech),
            stalker: default_enemy_stats(EnemyKind::Stalker),
            brute: default_enemy_stats(EnemyKind::Brute),
            golem: default_enemy_stats(EnemyKind::Golem),
        }
    }
}

impl EnemyStatTable {
    pub fn for_kind(&self, kind: EnemyKind) -> CombatStats {
        match kind {
            EnemyKind::Leech => self.leech,
            EnemyKind::Stalker => self.stalker,
            EnemyKind::Brute => self.brute,
            EnemyKind::Golem => self.golem,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Added to the player's chance to hit an enemy.
    pub base_hit_chance: f64,
    /// Floor on the player's chance to hit an enemy. Enemies get no floor.
    pub min_player_hit_chance: f64,
    /// Per-stage flat bonus applied to every enemy stat at spawn.
    pub stage_scaling: f64,
    pub player_death_threshold: f64,
    pub enemy_death_threshold: f64,
    pub kill_bonus: KillBonusTable,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_hit_chance: 0.1,
            min_player_hit_chance: 0.1,
            stage_scaling: 0.001,
            player_death_threshold: 1.0,
            enemy_death_threshold: 0.01,
            kill_bonus: KillBonusTable::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub stage_points: u64,
    pub coin_points: u64,
    pub kill_points: u64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { stage_points: 10, coin_points: 25, kill_points: 50 }
    }
}

impl ScoreWeights {
    pub fn score(&self, stage: u32, coins: u32, kills: u32) -> u64 {
        u64::from(stage) * self.stage_points
            + u64::from(coins) * self.coin_points
            + u64::from(kills) * self.kill_points
    }
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        for (field, value) in [
            ("generation.walker_turn_chance", generation.walker_turn_chance),
            ("generation.coin_spawn_chance", generation.coin_spawn_chance),
            ("generation.enemy_spawn_chance", generation.enemy_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if generation.enemy_min_distance_sq < 0 {
            return Err(ConfigError::OutOfRange {
                field: "generation.enemy_min_distance_sq",
                value: generation.enemy_min_distance_sq as f64,
            });
        }
        if self.player.health <= 0.0 {
            return Err(ConfigError::OutOfRange { field: "player.health", value: self.player.health });
        }
        Ok(())
    }
}
