//! This module contains all the constants used by the ghost engine.

use std::time::Duration;

use glam::UVec2;

use crate::map::tile::TileIndex;

/// The nominal simulation rate, in ticks per second.
pub const TICK_RATE: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICK_RATE as f64) as u64);

/// The size of the game board, in cells (columns, rows).
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);

/// The raw layout of the game board, as a 2D array of characters.
///
/// `=` marks the house door, `H` the inside of the ghost house and `X` the player's start.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "######.## ###==### ##.######",
    "######.## #HHHHHH# ##.######",
    "T     .   #HHHHHH#   .     T",
    "######.## #HHHHHH# ##.######",
    "######.## ######## ##.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......X .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Tile coordinates of the ghost house and its surroundings.
pub mod house {
    use crate::map::tile::TileIndex;

    /// The tile directly above the left door tile; ghosts leave the house here.
    pub const EXIT: TileIndex = TileIndex::new(11, 13);
    /// Where an eaten ghost is revived.
    pub const RESPAWN: TileIndex = TileIndex::new(14, 13);
    /// Where a locked ghost waits for its release.
    pub const RALLY: TileIndex = TileIndex::new(14, 13);
    /// Tiles that do not allow a downward exit unless the ghost may be inside the house.
    pub const NO_DOWNWARD_EXIT: [TileIndex; 2] = [TileIndex::new(11, 13), TileIndex::new(11, 14)];
}

/// Movement tuning.
pub mod mechanics {
    /// Ghost base speed, in tiles per second.
    pub const GHOST_SPEED: f32 = 7.5;

    pub const SCATTER_MULTIPLIER: f32 = 1.0;
    pub const CHASE_MULTIPLIER: f32 = 1.08;
    pub const FRIGHTENED_MULTIPLIER: f32 = 0.5;
    pub const EATEN_MULTIPLIER: f32 = 4.0;
    pub const ROAM_MULTIPLIER: f32 = 1.08;

    /// Pinky looks this many tiles ahead of the player.
    pub const PINKY_LOOKAHEAD: i32 = 4;
    /// Inky's pivot lies this many tiles ahead of the player.
    pub const INKY_LOOKAHEAD: i32 = 2;
    /// Clyde chases only while farther than this from the player, in tiles.
    pub const CLYDE_SHYNESS_RADIUS: f32 = 8.0;
}

/// Mode and wave timing, in seconds.
pub mod timing {
    /// The wave index from which the schedule never leaves Chase.
    pub const TERMINAL_WAVE: u8 = 4;

    pub const EARLY_SCATTER: f32 = 7.0;
    pub const LATE_SCATTER: f32 = 5.0;
    /// Levels up to this one use [`EARLY_SCATTER`] for waves 0-2.
    pub const LAST_EARLY_LEVEL: u32 = 4;
    pub const CHASE: f32 = 20.0;
    pub const LONG_CHASE_MID: f32 = 1033.0;
    pub const LONG_CHASE_LATE: f32 = 1037.0;

    /// Frightened duration for levels 1 through 18; zero afterwards.
    pub const FRIGHTENED_BY_LEVEL: [f32; 18] = [
        6.0, 5.0, 4.0, 3.0, 2.0, 5.0, 2.0, 2.0, 1.0, 5.0, 2.0, 1.0, 1.0, 3.0, 1.0, 1.0, 0.0, 1.0,
    ];

    /// Super mode duration used when a collaborator does not specify one.
    pub const SUPER_DEFAULT: f32 = 10.0;

    /// House arrest base durations.
    pub const PINKY_HOUSE_BASE: f32 = 4.0;
    pub const INKY_HOUSE_BASE: f32 = 8.0;
    pub const CLYDE_HOUSE_BASE: f32 = 12.0;
}

/// Returns the Power mode duration for a level (1-based).
pub fn frightened_seconds(level: u32) -> f32 {
    let index = level.max(1) as usize - 1;
    timing::FRIGHTENED_BY_LEVEL.get(index).copied().unwrap_or(0.0)
}

/// The player's fallback start tile, used when the board does not mark one.
pub const PLAYER_START: TileIndex = TileIndex::new(23, 13);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_raw_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
        for row in RAW_BOARD {
            assert_eq!(row.chars().count(), BOARD_CELL_SIZE.x as usize, "row {row:?}");
        }
    }

    #[test]
    fn test_frightened_seconds() {
        assert_eq!(frightened_seconds(1), 6.0);
        assert_eq!(frightened_seconds(3), 4.0);
        assert_eq!(frightened_seconds(17), 0.0);
        assert_eq!(frightened_seconds(18), 1.0);
        assert_eq!(frightened_seconds(19), 0.0);
        assert_eq!(frightened_seconds(250), 0.0);
        // Level zero is treated as the first level
        assert_eq!(frightened_seconds(0), 6.0);
    }
}
