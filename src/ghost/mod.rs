//! Ghost identities and their fixed per-ghost data.

use bevy_ecs::component::Component;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::map::direction::Direction;
use crate::map::tile::TileIndex;

pub mod state;
pub mod targeting;

const BLINKY_SCATTER: [TileIndex; 4] = [
    TileIndex::new(1, 26),
    TileIndex::new(5, 26),
    TileIndex::new(5, 21),
    TileIndex::new(1, 21),
];
const PINKY_SCATTER: [TileIndex; 4] = [
    TileIndex::new(1, 1),
    TileIndex::new(1, 6),
    TileIndex::new(5, 6),
    TileIndex::new(5, 1),
];
const INKY_SCATTER: [TileIndex; 4] = [
    TileIndex::new(29, 26),
    TileIndex::new(29, 15),
    TileIndex::new(26, 15),
    TileIndex::new(26, 26),
];
const CLYDE_SCATTER: [TileIndex; 4] = [
    TileIndex::new(29, 1),
    TileIndex::new(29, 12),
    TileIndex::new(26, 12),
    TileIndex::new(26, 1),
];

/// The four classic ghost personalities. Selects the targeting formula.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    pub const ALL: [Ghost; 4] = [Ghost::Blinky, Ghost::Pinky, Ghost::Inky, Ghost::Clyde];

    pub const fn as_index(self) -> usize {
        match self {
            Ghost::Blinky => 0,
            Ghost::Pinky => 1,
            Ghost::Inky => 2,
            Ghost::Clyde => 3,
        }
    }

    /// Where the ghost is placed at every level (re)start.
    pub const fn spawn_tile(self) -> TileIndex {
        match self {
            Ghost::Blinky => TileIndex::new(11, 13),
            Ghost::Pinky => TileIndex::new(14, 13),
            Ghost::Inky => TileIndex::new(14, 11),
            Ghost::Clyde => TileIndex::new(14, 16),
        }
    }

    pub const fn spawn_direction(self) -> Direction {
        match self {
            Ghost::Blinky => Direction::Left,
            Ghost::Pinky => Direction::Down,
            Ghost::Inky | Ghost::Clyde => Direction::Up,
        }
    }

    /// Blinky starts outside the house and is never held there.
    pub const fn starts_locked(self) -> bool {
        !matches!(self, Ghost::Blinky)
    }

    /// The cyclic Scatter path. The first waypoint is the ghost's home corner.
    pub const fn scatter_path(self) -> &'static [TileIndex] {
        match self {
            Ghost::Blinky => &BLINKY_SCATTER,
            Ghost::Pinky => &PINKY_SCATTER,
            Ghost::Inky => &INKY_SCATTER,
            Ghost::Clyde => &CLYDE_SCATTER,
        }
    }

    pub const fn scatter_corner(self) -> TileIndex {
        self.scatter_path()[0]
    }
}
