//! Bump combat: the player's strike, kill bonus and lifesteal, then the
//! enemy's counter-attack, resolved once per bump in that order.

use log::{info, trace};

use super::*;
use crate::config::CombatConfig;
use crate::state::Enemy;

/// Resolves both directions of one bump. The counter-attack fires even when
/// the strike kills, using the enemy's stats at that moment.
pub fn resolve_bump(
    player: &mut Player,
    enemy: &mut Enemy,
    combat: &CombatConfig,
    rng: &mut impl RandomSource,
) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();

    let strike_chance = (player.accuracy - enemy.hit_resistance + combat.base_hit_chance)
        .max(combat.min_player_hit_chance);
    if lands(strike_chance, rng) {
        enemy.health -= player.damage;
        outcome.damage_dealt = player.damage;
    }

    if enemy.health < combat.enemy_death_threshold {
        outcome.enemy_killed = true;
        let bonus = combat.kill_bonus.for_kind(enemy.kind);
        outcome.healed += player.heal(bonus.heal);
        player.lifesteal += bonus.lifesteal;
        player.accuracy += bonus.accuracy;
        player.damage += bonus.damage;
        player.hit_resistance += bonus.hit_resistance;
        player.kills += 1;
    }
    outcome.healed += player.heal(player.lifesteal);

    let counter_chance = enemy.accuracy - player.hit_resistance;
    if lands(counter_chance, rng) {
        player.health -= enemy.damage;
        outcome.damage_taken = enemy.damage;
    }
    outcome.player_killed = player.health < combat.player_death_threshold;

    outcome
}

/// Chances above 1 land without consuming a roll.
fn lands(chance: f64, rng: &mut impl RandomSource) -> bool {
    chance > 1.0 || rng.next_f64() < chance
}

impl<R: RandomSource> Game<R> {
    pub(super) fn bump(&mut self, enemy_id: EntityId) -> CombatOutcome {
        let Some(enemy) = self.world.enemies.get_mut(enemy_id) else {
            return CombatOutcome::default();
        };
        let kind = enemy.kind;
        let outcome =
            resolve_bump(&mut self.world.player, enemy, &self.config.combat, &mut self.rng);
        trace!("bump {kind:?}: {outcome:?}");

        if outcome.damage_dealt > 0.0 {
            self.events.push(GameEvent::EnemyHit { kind });
        }
        if outcome.enemy_killed {
            self.world.enemies.remove(enemy_id);
            self.events.push(GameEvent::EnemySlain { kind });
        }
        if outcome.damage_taken > 0.0 {
            self.events.push(GameEvent::PlayerHit);
        }
        if outcome.player_killed {
            info!("player slain by {kind:?} at stage {}, score {}", self.stage, self.score());
            self.phase = LevelPhase::GameOver;
            self.events.push(GameEvent::PlayerDied);
        }
        outcome
    }
}
