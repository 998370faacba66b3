/// Tile kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TileKind {
    Air,
    Wall,       // Solid, climbed over when bumped into
    Player,     // Display overlay only, never in the authoritative level
    Monster,    // Deadly to step on, removable by attack
    Coin,       // Pickup, +1 score
    Checkpoint, // Pickup, no score
    Goal,
}

impl TileKind {
    pub const ALL: [TileKind; 7] = [
        TileKind::Air,
        TileKind::Wall,
        TileKind::Player,
        TileKind::Monster,
        TileKind::Coin,
        TileKind::Checkpoint,
        TileKind::Goal,
    ];

    /// Is this empty space? Only air lets the player fall through it.
    pub fn is_air(self) -> bool {
        matches!(self, TileKind::Air)
    }

    /// Does bumping into this tile trigger a wall-climb?
    pub fn is_wall(self) -> bool {
        matches!(self, TileKind::Wall)
    }

    /// Can the player stand on top of this tile?
    /// Anything that is not air acts as footing, including pickups.
    pub fn is_footing(self) -> bool {
        !self.is_air()
    }

    /// Is this tile removed when the player stands on it?
    pub fn is_collectible(self) -> bool {
        matches!(self, TileKind::Coin | TileKind::Checkpoint)
    }

    /// Does standing on this tile end the session?
    pub fn is_terminal(self) -> bool {
        matches!(self, TileKind::Goal | TileKind::Monster)
    }

    /// Lowercase name for log lines.
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Air => "air",
            TileKind::Wall => "wall",
            TileKind::Player => "player",
            TileKind::Monster => "monster",
            TileKind::Coin => "coin",
            TileKind::Checkpoint => "checkpoint",
            TileKind::Goal => "goal",
        }
    }
}
