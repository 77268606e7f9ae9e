//! Random walk with directional persistence, used to carve the floor.

use crate::rng::RandomSource;
use crate::types::{Direction, Pos};

#[derive(Clone, Debug, PartialEq)]
pub struct Walker {
    pos: Pos,
    turn_chance: f64,
    heading: Direction,
}

impl Walker {
    pub fn new(start: Pos, turn_chance: f64, rng: &mut impl RandomSource) -> Self {
        Self::with_heading(start, turn_chance, random_heading(rng))
    }

    pub fn with_heading(start: Pos, turn_chance: f64, heading: Direction) -> Self {
        Self { pos: start, turn_chance: turn_chance.clamp(0.0, 1.0), heading }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// With probability `turn_chance` redraws the heading (possibly to the same
    /// one), then moves one tile along it.
    pub fn step(&mut self, rng: &mut impl RandomSource) -> Pos {
        if rng.chance(self.turn_chance) {
            self.heading = random_heading(rng);
        }
        self.pos = self.pos.step(self.heading);
        self.pos
    }
}

fn random_heading(rng: &mut impl RandomSource) -> Direction {
    Direction::ALL[rng.below(Direction::ALL.len())]
}
