use log::trace;

use super::*;

impl<R: RandomSource> Game<R> {
    pub(super) fn resolve_move(&mut self, direction: Direction) -> Result<TurnOutcome, GameError> {
        let destination = self.world.player.pos.step(direction);

        let outcome = if let Some(wall) = self.world.walls.at(destination) {
            if self.world.player.has_key && wall.kind == WallKind::Exit {
                return Ok(self.use_exit()?);
            }
            trace!("blocked by wall at {destination:?}");
            TurnOutcome::Blocked
        } else if let Some(enemy) = self.world.enemies.id_at(destination) {
            TurnOutcome::Bump(self.bump(enemy))
        } else {
            self.world.player.pos = destination;
            TurnOutcome::Moved { to: destination }
        };

        self.collect_pickup();
        Ok(outcome)
    }

    /// Consumes whatever pickup lies under the player.
    fn collect_pickup(&mut self) {
        let player = &mut self.world.player;
        let Some(id) = self.world.pickups.id_at(player.pos) else {
            return;
        };
        let Some(pickup) = self.world.pickups.remove(id) else {
            return;
        };
        match pickup.kind {
            PickupKind::Coin => {
                player.coins += 1;
                self.events.push(GameEvent::CoinCollected);
            }
            PickupKind::Key => {
                player.has_key = true;
                self.events.push(GameEvent::KeyCollected);
            }
        }
    }
}
