use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct EntityId;
}

/// Integer tile coordinate. The grid is unbounded; `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { y: 0, x: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        Direction::ALL.map(|direction| self.step(direction))
    }

    /// The 3x3 ring around `self`, row by row, without the center.
    pub fn ring(self) -> impl Iterator<Item = Pos> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                (dx != 0 || dy != 0).then_some(Pos { y: self.y + dy, x: self.x + dx })
            })
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north; matches the (top, right, bottom, left) mask order.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Floor,
    Walls,
    Pickups,
    Enemies,
    Player,
}

impl Layer {
    /// Back-to-front draw order.
    pub const ALL: [Layer; 5] =
        [Layer::Floor, Layer::Walls, Layer::Pickups, Layer::Enemies, Layer::Player];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Leech,
    Stalker,
    Brute,
    Golem,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] =
        [EnemyKind::Leech, EnemyKind::Stalker, EnemyKind::Brute, EnemyKind::Golem];

    pub const fn index(self) -> usize {
        match self {
            EnemyKind::Leech => 0,
            EnemyKind::Stalker => 1,
            EnemyKind::Brute => 2,
            EnemyKind::Golem => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PickupKind {
    Coin,
    Key,
}

impl PickupKind {
    pub const fn visual_index(self) -> u8 {
        match self {
            PickupKind::Coin => 0,
            PickupKind::Key => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WallKind {
    Ordinary,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorVariant {
    Flagstone,
    Cracked,
    Gravel,
    Planks,
    Moss,
}

impl FloorVariant {
    pub const ALL: [FloorVariant; 5] = [
        FloorVariant::Flagstone,
        FloorVariant::Cracked,
        FloorVariant::Gravel,
        FloorVariant::Planks,
        FloorVariant::Moss,
    ];

    /// Variants drawn from when no fixed variant is configured.
    pub const PLAIN: [FloorVariant; 3] =
        [FloorVariant::Flagstone, FloorVariant::Cracked, FloorVariant::Gravel];

    pub const fn name(self) -> &'static str {
        match self {
            FloorVariant::Flagstone => "flagstone",
            FloorVariant::Cracked => "cracked",
            FloorVariant::Gravel => "gravel",
            FloorVariant::Planks => "planks",
            FloorVariant::Moss => "moss",
        }
    }

    pub const fn visual_index(self) -> u8 {
        match self {
            FloorVariant::Flagstone => 0,
            FloorVariant::Cracked => 1,
            FloorVariant::Gravel => 2,
            FloorVariant::Planks => 3,
            FloorVariant::Moss => 4,
        }
    }
}

/// How carved tiles pick their floor variant. Written as a variant name, or
/// `"random"` to draw one of [`FloorVariant::PLAIN`] per tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FloorStyle {
    Fixed(FloorVariant),
    Random,
}

impl TryFrom<String> for FloorStyle {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        if name == "random" {
            return Ok(FloorStyle::Random);
        }
        FloorVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == name)
            .map(FloorStyle::Fixed)
            .ok_or_else(|| format!("unknown floor variant `{name}`"))
    }
}

impl From<FloorStyle> for String {
    fn from(style: FloorStyle) -> Self {
        match style {
            FloorStyle::Fixed(variant) => variant.name().to_string(),
            FloorStyle::Random => "random".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationPhase {
    Carving,
    Walls,
    Exit,
    Coins,
    Enemies,
    Backfill,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelPhase {
    Generating,
    Active,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    Move(Direction),
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    LevelGenerated { stage: u32 },
    EnemyHit { kind: EnemyKind },
    EnemySlain { kind: EnemyKind },
    PlayerHit,
    PlayerDied,
    CoinCollected,
    KeyCollected,
    ExitOpened { stage: u32 },
}

/// What a single input did to the world.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    Moved { to: Pos },
    Blocked,
    Bump(CombatOutcome),
    ExitUsed { stage: u32 },
    Restarted,
}

/// Both halves of one bump: the player's strike, then the enemy's reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombatOutcome {
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub enemy_killed: bool,
    pub player_killed: bool,
    pub healed: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("carving produced no floor tiles (max_steps = {max_steps})")]
    NoFloorCarved { max_steps: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("input rejected while the level is {0:?}")]
    NotActive(LevelPhase),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
