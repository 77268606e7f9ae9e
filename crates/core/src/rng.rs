//! Injectable randomness for generation and combat.
//! Every roll in the crate goes through [`RandomSource`] so a seeded or
//! scripted source can stand in for the default generator.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

const F64_UNIT: f64 = 1.0 / (1_u64 << 53) as f64;

pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * F64_UNIT
    }

    /// Uniform in `0..n`; `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_u64(&mut self) -> u64 {
        Rng::next_u64(self)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Replays a fixed cycle of rolls in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        let mut rolls: Vec<f64> = rolls.into();
        if rolls.is_empty() {
            rolls.push(0.0);
        }
        for roll in &mut rolls {
            *roll = roll.clamp(0.0, 1.0 - F64_UNIT);
        }
        Self { rolls, cursor: 0 }
    }

    pub fn constant(roll: f64) -> Self {
        Self::new(vec![roll])
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn next_u64(&mut self) -> u64 {
        ((self.next_f64() / F64_UNIT) as u64) << 11
    }

    fn next_f64(&mut self) -> f64 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}
