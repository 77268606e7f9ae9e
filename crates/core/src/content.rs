use serde::{Deserialize, Serialize};

use crate::types::EnemyKind;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub damage: f64,
    pub health: f64,
    pub hit_resistance: f64,
    pub accuracy: f64,
}

impl CombatStats {
    /// Every stat raised by the same flat amount.
    pub fn scaled(self, bonus: f64) -> Self {
        Self {
            damage: self.damage + bonus,
            health: self.health + bonus,
            hit_resistance: self.hit_resistance + bonus,
            accuracy: self.accuracy + bonus,
        }
    }
}

pub const PLAYER_BASE_STATS: CombatStats =
    CombatStats { damage: 1.0, health: 15.0, hit_resistance: 0.25, accuracy: 0.5 };

/// Player base stats.
impl Default for CombatStats {
    fn default() -> Self {
        PLAYER_BASE_STATS
    }
}

pub fn default_enemy_stats(kind: EnemyKind) -> CombatStats {
    match kind {
        EnemyKind::Leech => {
            CombatStats { damage: 1.0, health: 3.0, hit_resistance: 0.1, accuracy: 0.3 }
        }
        EnemyKind::Stalker => {
            CombatStats { damage: 0.25, health: 4.0, hit_resistance: 0.15, accuracy: 0.6 }
        }
        EnemyKind::Brute => {
            CombatStats { damage: 3.0, health: 2.0, hit_resistance: 0.05, accuracy: 0.5 }
        }
        EnemyKind::Golem => {
            CombatStats { damage: 1.5, health: 8.0, hit_resistance: 0.35, accuracy: 0.35 }
        }
    }
}

/// Stat growth granted to the player for slaying one enemy of a kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KillBonus {
    pub heal: f64,
    pub lifesteal: f64,
    pub accuracy: f64,
    pub damage: f64,
    pub hit_resistance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillBonusTable {
    pub leech_heal: f64,
    pub leech_lifesteal: f64,
    pub stalker_accuracy: f64,
    pub brute_damage: f64,
    pub golem_resistance: f64,
}

impl Default for KillBonusTable {
    fn default() -> Self {
        Self {
            leech_heal: 3.0,
            leech_lifesteal: 0.005,
            stalker_accuracy: 0.005,
            brute_damage: 0.001,
            golem_resistance: 0.005,
        }
    }
}

impl KillBonusTable {
    pub fn for_kind(&self, kind: EnemyKind) -> KillBonus {
        match kind {
            EnemyKind::Leech => KillBonus {
                heal: self.leech_heal,
                lifesteal: self.leech_lifesteal,
                ..KillBonus::default()
            },
            EnemyKind::Stalker => {
                KillBonus { accuracy: self.stalker_accuracy, ..KillBonus::default() }
            }
            EnemyKind::Brute => KillBonus { damage: self.brute_damage, ..KillBonus::default() },
            EnemyKind::Golem => {
                KillBonus { hit_resistance: self.golem_resistance, ..KillBonus::default() }
            }
        }
    }
}
