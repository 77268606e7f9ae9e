use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use clap::Parser;
use cryptwalk_core::{Direction, Game, Input, LevelPhase, TurnOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level seed; derived from the clock when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Seed for the move picker; defaults to the level seed
    #[arg(long)]
    bot_seed: Option<u64>,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// Restart instead of stopping when the player dies
    #[arg(long)]
    keep_going: bool,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn check_invariants(game: &Game, tick: u32) -> Result<()> {
    let state = game.state();
    let player = state.player.pos;
    if state.walls.contains(player) {
        bail!("tick {tick}: player inside wall at {player:?}");
    }
    if state.enemies.contains(player) {
        bail!("tick {tick}: player sharing a tile with an enemy at {player:?}");
    }
    for (_, enemy) in state.enemies.iter() {
        if state.walls.contains(enemy.pos) {
            bail!("tick {tick}: enemy inside wall at {:?}", enemy.pos);
        }
    }
    if state.exit_count() != 1 {
        bail!("tick {tick}: level has {} exits", state.exit_count());
    }
    if state.key_count() > 1 {
        bail!("tick {tick}: level has {} keys", state.key_count());
    }
    if state.player.health > state.player.max_health {
        bail!("tick {tick}: health {} above max {}", state.player.health, state.player.max_health);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    });

    println!("Starting fuzz run on seed {seed} for max {} ticks...", args.ticks);
    let mut game = Game::new(seed)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.bot_seed.unwrap_or(seed));
    let (mut exits, mut deaths) = (0_u32, 0_u32);

    for tick in 0..args.ticks {
        if game.phase() == LevelPhase::GameOver {
            deaths += 1;
            println!("Died at stage {} with score {}", game.stage(), game.score());
            if !args.keep_going {
                break;
            }
            game.apply_input(Input::Restart)?;
        }

        let direction = choose(&mut rng, &Direction::ALL);
        if let TurnOutcome::ExitUsed { stage } = game.apply_input(Input::Move(direction))? {
            exits += 1;
            log::info!("tick {tick}: reached stage {stage}");
        }
        check_invariants(&game, tick)?;
        game.drain_events();
    }

    println!(
        "Finished: stage {}, exits {exits}, deaths {deaths}, score {}, snapshot {:016x}",
        game.stage(),
        game.score(),
        game.snapshot_hash()
    );
    Ok(())
}
