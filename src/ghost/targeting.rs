//! Chase targeting formulas.
//!
//! All targets are raw grid coordinates: they may lie inside walls or outside the
//! board, and are only ever used for distance comparisons.

use tracing::warn;

use crate::constants::mechanics::{CLYDE_SHYNESS_RADIUS, INKY_LOOKAHEAD, PINKY_LOOKAHEAD};
use crate::ghost::Ghost;
use crate::map::direction::Direction;
use crate::map::tile::TileIndex;
use crate::map::tracker::{ActorTag, PositionTracker};

/// The tile `n` steps ahead of the player.
///
/// Facing up also shifts the target `n` columns to the left, reproducing the
/// arcade's overflow bug.
pub fn lookahead(player: TileIndex, direction: Direction, n: i32) -> TileIndex {
    let ahead = player.step(direction, n);
    match direction {
        Direction::Up => TileIndex::new(ahead.row, ahead.col - n),
        _ => ahead,
    }
}

pub fn blinky_target(player: TileIndex) -> TileIndex {
    player
}

pub fn pinky_target(player: TileIndex, direction: Direction) -> TileIndex {
    lookahead(player, direction, PINKY_LOOKAHEAD)
}

/// Reflects Blinky's tile through the pivot two tiles ahead of the player.
pub fn inky_target(player: TileIndex, direction: Direction, blinky: TileIndex) -> TileIndex {
    let pivot = lookahead(player, direction, INKY_LOOKAHEAD);
    pivot + (pivot - blinky)
}

/// Clyde chases only while far from the player; up close he heads home.
pub fn clyde_target(clyde: TileIndex, player: TileIndex) -> TileIndex {
    if clyde.distance(player) > CLYDE_SHYNESS_RADIUS {
        player
    } else {
        Ghost::Clyde.scatter_corner()
    }
}

/// Computes a ghost's Chase target from the tracked positions.
///
/// Returns `None` while the player's position is unknown.
pub fn chase_target(ghost: Ghost, own_tile: TileIndex, tracker: &PositionTracker) -> Option<TileIndex> {
    let player = tracker.get(ActorTag::Player)?;

    let target = match ghost {
        Ghost::Blinky => blinky_target(player.tile),
        Ghost::Pinky => pinky_target(player.tile, player.direction),
        Ghost::Inky => match tracker.position(ActorTag::Ghost(Ghost::Blinky)) {
            Some(blinky) => inky_target(player.tile, player.direction, blinky),
            None => {
                warn!("Blinky is not tracked, Inky falls back to his pivot tile");
                lookahead(player.tile, player.direction, INKY_LOOKAHEAD)
            }
        },
        Ghost::Clyde => clyde_target(own_tile, player.tile),
    };
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead_up_quirk() {
        let player = TileIndex::new(10, 10);
        assert_eq!(lookahead(player, Direction::Up, 4), TileIndex::new(6, 6));
        assert_eq!(lookahead(player, Direction::Down, 4), TileIndex::new(14, 10));
        assert_eq!(lookahead(player, Direction::Left, 2), TileIndex::new(10, 8));
    }

    #[test]
    fn test_inky_reflection() {
        // Pivot is (10, 12); Blinky at (10, 8) reflects to (10, 16)
        let target = inky_target(TileIndex::new(10, 10), Direction::Right, TileIndex::new(10, 8));
        assert_eq!(target, TileIndex::new(10, 16));
    }

    #[test]
    fn test_clyde_boundary() {
        let player = TileIndex::new(10, 10);
        // Exactly eight tiles away is not "farther than eight"
        assert_eq!(clyde_target(TileIndex::new(18, 10), player), Ghost::Clyde.scatter_corner());
        assert_eq!(clyde_target(TileIndex::new(19, 10), player), player);
    }
}
