//! The direction decision made by every ghost at each tile center.

use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::MazeError;
use crate::map::direction::Direction;
use crate::map::maze::{CollisionMap, TraversalFlags};
use crate::map::tile::TileIndex;
use crate::movement::controller::{HouseArbitration, TargetingMode};

/// Everything the selection algorithm needs to know about one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// The tile whose center the actor just reached.
    pub tile: TileIndex,
    /// The direction the actor was travelling, if any.
    pub travel: Option<Direction>,
    pub mode: TargetingMode,
    pub flags: TraversalFlags,
    /// Set after a mode switch; the actor turns around if it legally can.
    pub force_reverse: bool,
    pub house: HouseArbitration,
}

/// Chooses the direction to leave `decision.tile` in.
///
/// Directions are considered in [`Direction::PRIORITY`] order. The reverse of the
/// current travel is only taken when forced or when it is the only legal move.
/// In target mode, the candidate whose next tile is strictly closest to the target
/// wins, so ties resolve to the earlier direction in priority order.
///
/// # Errors
///
/// Returns [`MazeError::NoLegalMove`] when no direction is legal, reversal included.
pub fn select_direction<M, R>(map: &M, decision: &Decision, rng: &mut R) -> Result<Direction, MazeError>
where
    M: CollisionMap + ?Sized,
    R: Rng + ?Sized,
{
    let tile = decision.tile;
    let reverse = decision.travel.map(Direction::opposite);
    let legal = |direction: Direction| {
        if map.is_blocked(tile, direction, decision.flags) {
            return false;
        }
        !(direction == Direction::Down && map.forbids_downward_exit(tile) && !decision.house.may_enter)
    };

    if decision.force_reverse {
        if let Some(reverse) = reverse.filter(|reverse| legal(*reverse)) {
            trace!(%tile, direction = reverse.as_ref(), "Forced reversal");
            return Ok(reverse);
        }
    }

    let mut candidates: SmallVec<[Direction; 4]> = Direction::PRIORITY
        .iter()
        .copied()
        .filter(|direction| Some(*direction) != reverse)
        .filter(|direction| legal(*direction))
        .collect();

    // Dead end: turning around is the only way out
    if candidates.is_empty() {
        if let Some(reverse) = reverse.filter(|reverse| legal(*reverse)) {
            candidates.push(reverse);
        }
    }

    let mode = decision.house.override_target(map, tile).unwrap_or(decision.mode);

    let chosen = match (candidates.as_slice(), mode) {
        ([], _) => return Err(MazeError::NoLegalMove(tile)),
        ([only], _) => *only,
        (_, TargetingMode::Random) => *candidates
            .as_slice()
            .choose(rng)
            .ok_or(MazeError::NoLegalMove(tile))?,
        (_, TargetingMode::Target(target)) => closest_to(map, tile, &candidates, target),
    };

    trace!(%tile, direction = chosen.as_ref(), ?mode, "Direction selected");
    Ok(chosen)
}

/// Keeps the first candidate unless a later one is strictly closer.
fn closest_to<M: CollisionMap + ?Sized>(map: &M, tile: TileIndex, candidates: &[Direction], target: TileIndex) -> Direction {
    let mut best = candidates[0];
    let mut best_distance = map.neighbor(tile, best).distance(target);

    for &direction in &candidates[1..] {
        let distance = map.neighbor(tile, direction).distance(target);
        if distance < best_distance {
            best = direction;
            best_distance = distance;
        }
    }
    best
}
