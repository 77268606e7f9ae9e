//! Turn-driven game session. Each input resolves atomically: move or reject,
//! then combat, then pickup, before the next input is accepted.

use std::mem;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::GameConfig;
use crate::mapgen::LevelReport;
use crate::rng::RandomSource;
use crate::state::{Player, Sprite, World};
use crate::types::*;

mod combat;
mod hash;
mod lifecycle;
mod movement;
#[cfg(test)]
pub(crate) mod test_support;

pub use combat::resolve_bump;
pub use hash::level_fingerprint;

/// Receives each generation phase just before it runs.
pub type ProgressObserver = Box<dyn FnMut(GenerationPhase)>;

pub struct Game<R = ChaCha8Rng> {
    config: GameConfig,
    seed: Option<u64>,
    rng: R,
    world: World,
    /// Levels generated so far in this run.
    stage: u32,
    phase: LevelPhase,
    report: LevelReport,
    events: Vec<GameEvent>,
    observer: Option<ProgressObserver>,
}

impl Game<ChaCha8Rng> {
    pub fn new(seed: u64) -> Result<Self, GenerationError> {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, GenerationError> {
        let mut game = Self::unstarted(config, Some(seed), ChaCha8Rng::seed_from_u64(seed));
        game.start_level()?;
        Ok(game)
    }
}

impl<R: RandomSource> Game<R> {
    /// Starts a run drawing every roll from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GenerationError> {
        let mut game = Self::unstarted(config, None, rng);
        game.start_level()?;
        Ok(game)
    }

    fn unstarted(config: GameConfig, seed: Option<u64>, rng: R) -> Self {
        let player = Player::new(config.player);
        Self {
            config,
            seed,
            rng,
            world: World::new(player),
            stage: 0,
            phase: LevelPhase::Generating,
            report: LevelReport::default(),
            events: Vec::new(),
            observer: None,
        }
    }

    pub fn apply_input(&mut self, input: Input) -> Result<TurnOutcome, GameError> {
        match input {
            Input::Restart => {
                self.restart()?;
                Ok(TurnOutcome::Restarted)
            }
            Input::Move(direction) => {
                if self.phase != LevelPhase::Active {
                    return Err(GameError::NotActive(self.phase));
                }
                self.resolve_move(direction)
            }
        }
    }

    /// Abandons the current run and starts over from stage 0 with a fresh player.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.world = World::new(Player::new(self.config.player));
        self.stage = 0;
        self.start_level()?;
        Ok(())
    }

    pub fn set_progress_observer(&mut self, observer: ProgressObserver) {
        self.observer = Some(observer);
    }

    pub fn state(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Summary of the level currently in play.
    pub fn level_report(&self) -> &LevelReport {
        &self.report
    }

    pub fn score(&self) -> u64 {
        let player = &self.world.player;
        self.config.score.score(self.stage, player.coins, player.kills)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn sprites(&self) -> Vec<Sprite> {
        self.world.sprites()
    }
}
