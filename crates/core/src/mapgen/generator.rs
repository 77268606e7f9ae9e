//! Level pipeline. Phases run strictly in order; each reads the layers the
//! previous ones completed.

use log::debug;

use crate::config::GameConfig;
use crate::rng::RandomSource;
use crate::state::World;
use crate::types::{GenerationError, GenerationPhase, Pos};

use super::model::LevelReport;
use super::spawns::{
    SpawnContext, backfill_corner_floors, place_coins, place_enemies, place_floor,
};
use super::walker::Walker;
use super::walls::{assign_masks_and_exit, synthesize_walls};

pub struct DungeonGenerator<'a> {
    config: &'a GameConfig,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Builds a level into `world`, whose generated layers must be empty.
    /// `observer` is told each phase before it starts.
    pub fn generate(
        &self,
        world: &mut World,
        stage: u32,
        rng: &mut impl RandomSource,
        observer: &mut dyn FnMut(GenerationPhase),
    ) -> Result<LevelReport, GenerationError> {
        let generation = &self.config.generation;
        if generation.max_steps == 0 {
            return Err(GenerationError::NoFloorCarved { max_steps: generation.max_steps });
        }
        debug_assert!(world.floor.is_empty() && world.walls.is_empty());

        observer(GenerationPhase::Carving);
        let carved_tiles = self.carve_floor(world, rng);
        if carved_tiles == 0 {
            return Err(GenerationError::NoFloorCarved { max_steps: generation.max_steps });
        }
        debug!("carved {carved_tiles} floor tiles in {} steps", generation.max_steps);

        observer(GenerationPhase::Walls);
        let corner_floors = synthesize_walls(world);
        debug!("placed {} walls, {} corner candidates", world.walls.len(), corner_floors.len());

        observer(GenerationPhase::Exit);
        let exit = assign_masks_and_exit(world);
        debug!("exit at {exit:?}");

        let context = SpawnContext {
            generation,
            enemy_stats: &self.config.enemies,
            stat_bonus: f64::from(stage) * self.config.combat.stage_scaling,
        };

        observer(GenerationPhase::Coins);
        let (coins, key) = place_coins(world, &context, rng);
        debug!("dropped {coins} coins, key at {key:?}");

        observer(GenerationPhase::Enemies);
        let enemies = place_enemies(world, &context, rng);
        debug!("spawned {enemies} enemies at stage {stage}");

        observer(GenerationPhase::Backfill);
        backfill_corner_floors(world, &corner_floors, generation.floor_variant, rng);

        Ok(LevelReport {
            stage,
            carved_tiles,
            floor_tiles: world.floor.len(),
            walls: world.walls.len(),
            exit,
            coins,
            key,
            enemies,
            corner_floors: corner_floors.len(),
        })
    }

    fn carve_floor(&self, world: &mut World, rng: &mut impl RandomSource) -> usize {
        let generation = &self.config.generation;
        let mut walker = Walker::new(Pos::ORIGIN, generation.walker_turn_chance, rng);
        for _ in 0..generation.max_steps {
            place_floor(world, walker.pos(), generation.floor_variant, rng);
            walker.step(rng);
        }
        world.floor.len()
    }
}
