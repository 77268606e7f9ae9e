//! Stable fingerprints for determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

use super::*;

/// Hash of the level layout alone.
pub fn level_fingerprint(world: &World) -> u64 {
    xxh3_64(&world.canonical_bytes())
}

impl<R> Game<R> {
    /// Hash of the run: seed, progression, player state and level layout.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed.unwrap_or_default());
        hasher.write_u32(self.stage);
        hasher.write_u8(match self.phase {
            LevelPhase::Generating => 0,
            LevelPhase::Active => 1,
            LevelPhase::GameOver => 2,
        });
        let player = &self.world.player;
        hasher.write_i32(player.pos.x);
        hasher.write_i32(player.pos.y);
        for stat in [
            player.damage,
            player.health,
            player.max_health,
            player.hit_resistance,
            player.accuracy,
            player.lifesteal,
        ] {
            hasher.write_u64(stat.to_bits());
        }
        hasher.write_u32(player.coins);
        hasher.write_u32(player.kills);
        hasher.write_u8(u8::from(player.has_key));
        hasher.write(&self.world.canonical_bytes());
        hasher.finish()
    }
}
