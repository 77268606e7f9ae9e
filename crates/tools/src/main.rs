use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use cryptwalk_core::{
    EnemyKind, Game, GameConfig, Layer, PickupKind, Pos, Sprite, Wall, level_fingerprint,
};
use serde::Serialize;

/// Generates one level and prints it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the level; derived from the clock when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print a JSON summary instead of the map
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    stage: u32,
    carved_tiles: usize,
    floor_tiles: usize,
    walls: usize,
    exit: Option<(i32, i32)>,
    coins: usize,
    key: Option<(i32, i32)>,
    enemies: BTreeMap<&'static str, usize>,
    corner_floors: usize,
    fingerprint: String,
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GameConfig::from_toml_str(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn enemy_glyph(kind: EnemyKind) -> char {
    match kind {
        EnemyKind::Leech => 'l',
        EnemyKind::Stalker => 's',
        EnemyKind::Brute => 'b',
        EnemyKind::Golem => 'g',
    }
}

fn enemy_name(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Leech => "leech",
        EnemyKind::Stalker => "stalker",
        EnemyKind::Brute => "brute",
        EnemyKind::Golem => "golem",
    }
}

fn sprite_glyph(sprite: &Sprite) -> char {
    match sprite.layer {
        Layer::Floor => '.',
        Layer::Walls if sprite.variant == Wall::EXIT_VISUAL_INDEX => 'E',
        Layer::Walls => '#',
        Layer::Pickups if sprite.variant == PickupKind::Key.visual_index() => 'k',
        Layer::Pickups => '$',
        Layer::Enemies => EnemyKind::ALL
            .into_iter()
            .find(|kind| kind.index() == usize::from(sprite.variant))
            .map_or('?', enemy_glyph),
        Layer::Player => '@',
    }
}

/// Sprites arrive back to front, so the topmost layer on a tile wins and a
/// backfilled corner shows as wall.
fn render(sprites: &[Sprite]) -> String {
    let mut tiles = BTreeMap::new();
    for sprite in sprites {
        tiles.insert((sprite.pos.y, sprite.pos.x), sprite_glyph(sprite));
    }
    let (mut min, mut max) = (Pos::ORIGIN, Pos::ORIGIN);
    for &(y, x) in tiles.keys() {
        min = Pos::new(min.x.min(x), min.y.min(y));
        max = Pos::new(max.x.max(x), max.y.max(y));
    }

    let mut out = String::new();
    for y in min.y..=max.y {
        let row: String =
            (min.x..=max.x).map(|x| tiles.get(&(y, x)).copied().unwrap_or(' ')).collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

fn summarize(game: &Game, seed: u64) -> Summary {
    let report = game.level_report();
    let mut enemies = BTreeMap::new();
    for (_, enemy) in game.state().enemies.iter() {
        *enemies.entry(enemy_name(enemy.kind)).or_insert(0) += 1;
    }
    Summary {
        seed,
        stage: report.stage,
        carved_tiles: report.carved_tiles,
        floor_tiles: report.floor_tiles,
        walls: report.walls,
        exit: report.exit.map(|pos| (pos.x, pos.y)),
        coins: report.coins,
        key: report.key.map(|pos| (pos.x, pos.y)),
        enemies,
        corner_floors: report.corner_floors,
        fingerprint: format!("{:016x}", level_fingerprint(game.state())),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("generating level for seed {seed}");

    let game = Game::with_config(config, seed).context("Level generation failed")?;

    if args.json {
        let summary = summarize(&game, seed);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render(&game.sprites()));
        println!("seed {seed}: {:?}", game.level_report());
    }

    Ok(())
}
