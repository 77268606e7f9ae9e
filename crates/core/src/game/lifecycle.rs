//! Level transitions: Generating to Active on completion, and back to
//! Generating when the exit is used.

use log::info;

use super::*;
use crate::mapgen::DungeonGenerator;

impl<R: RandomSource> Game<R> {
    /// Installs a prepared level and makes it playable, counting it as the
    /// first level of the run.
    pub fn with_level(config: GameConfig, world: World, rng: R) -> Self {
        let mut game = Self::unstarted(config, None, rng);
        game.world = world;
        game.stage = 1;
        game.phase = LevelPhase::Active;
        game
    }

    /// Clears the generated layers, resets the player's position and key,
    /// then runs the generator for the current stage.
    pub(super) fn start_level(&mut self) -> Result<(), GenerationError> {
        self.phase = LevelPhase::Generating;
        self.world.clear_level();
        self.world.player.pos = Pos::ORIGIN;
        self.world.player.has_key = false;

        let generator = DungeonGenerator::new(&self.config);
        let report = match self.observer.as_mut() {
            Some(observer) => {
                generator.generate(&mut self.world, self.stage, &mut self.rng, &mut **observer)?
            }
            None => generator.generate(&mut self.world, self.stage, &mut self.rng, &mut |_| {})?,
        };

        info!(
            "level {} ready: {} floor, {} walls, {} coins, {} enemies",
            report.stage, report.floor_tiles, report.walls, report.coins, report.enemies
        );
        self.events.push(GameEvent::LevelGenerated { stage: report.stage });
        self.report = report;
        self.stage += 1;
        self.phase = LevelPhase::Active;
        Ok(())
    }

    pub(super) fn use_exit(&mut self) -> Result<TurnOutcome, GenerationError> {
        info!("exit opened after stage {}", self.stage);
        self.events.push(GameEvent::ExitOpened { stage: self.stage });
        self.start_level()?;
        Ok(TurnOutcome::ExitUsed { stage: self.stage })
    }
}
