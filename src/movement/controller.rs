//! Per-actor grid movement: tile-to-tile travel and the decision hook at tile centers.

use bevy_ecs::component::Component;
use rand::Rng;
use tracing::trace;

use crate::constants::house;
use crate::error::MazeError;
use crate::map::direction::Direction;
use crate::map::maze::{CollisionMap, TraversalFlags};
use crate::map::tile::TileIndex;
use crate::movement::selection::{select_direction, Decision};

/// How the controller chooses between legal directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetingMode {
    /// Head for the tile, comparing straight-line distances.
    Target(TileIndex),
    /// Pick uniformly among the legal directions.
    Random,
}

/// Ghost-house permissions of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseArbitration {
    /// Held in the house until released.
    pub locked: bool,
    /// Allowed to go down into the house and stay there, as eaten ghosts are.
    pub may_enter: bool,
    /// Where a locked ghost waits.
    pub rally: TileIndex,
    /// Where a ghost that may not stay heads to leave.
    pub exit: TileIndex,
}

impl Default for HouseArbitration {
    fn default() -> Self {
        Self {
            locked: false,
            may_enter: false,
            rally: house::RALLY,
            exit: house::EXIT,
        }
    }
}

impl HouseArbitration {
    pub fn locked() -> Self {
        Self {
            locked: true,
            ..Self::default()
        }
    }

    /// Returns the target that replaces the actor's own while it is inside the house.
    pub fn override_target<M: CollisionMap + ?Sized>(&self, map: &M, tile: TileIndex) -> Option<TargetingMode> {
        if !map.is_in_house(tile) {
            return None;
        }
        if self.locked {
            Some(TargetingMode::Target(self.rally))
        } else if !self.may_enter {
            Some(TargetingMode::Target(self.exit))
        } else {
            None
        }
    }

    /// Locked ghosts may not pass the door.
    pub fn traversal_flags(&self) -> TraversalFlags {
        if self.locked {
            TraversalFlags::WALKWAY
        } else {
            TraversalFlags::GHOST
        }
    }
}

/// Owns one actor's grid position and direction.
///
/// The actor is always on the segment from the center of `tile` towards the next
/// tile in `direction`, `progress` tiles along it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct GridMover {
    pub tile: TileIndex,
    pub direction: Direction,
    /// Fraction of the way to the next tile center, in `[0, 1)`.
    pub progress: f32,
    pub speed_multiplier: f32,
    pub mode: TargetingMode,
    /// Destination whose arrival the current behavior wants to hear about.
    pub arrival: Option<TileIndex>,
    pub force_reverse: bool,
    pub house: HouseArbitration,
    needs_decision: bool,
}

impl GridMover {
    /// Places an actor at a tile center, awaiting its first decision.
    pub fn new(tile: TileIndex, direction: Direction, house: HouseArbitration) -> Self {
        Self {
            tile,
            direction,
            progress: 0.0,
            speed_multiplier: 0.0,
            mode: TargetingMode::Target(tile),
            arrival: None,
            force_reverse: false,
            house,
            needs_decision: true,
        }
    }

    /// Whether the actor sits on a tile center and has not yet chosen where to go.
    pub fn needs_decision(&self) -> bool {
        self.needs_decision
    }

    pub fn request_reverse(&mut self) {
        self.force_reverse = true;
    }

    pub fn subscribe_arrival(&mut self, destination: TileIndex) {
        self.arrival = Some(destination);
    }

    pub fn release_arrival(&mut self) {
        self.arrival = None;
    }

    /// Whether the subscribed destination is the tile just reached.
    pub fn arrival_reached(&self) -> bool {
        self.needs_decision && self.arrival == Some(self.tile)
    }

    /// Runs the selection algorithm at the current tile center.
    pub fn decide<M, R>(&mut self, map: &M, rng: &mut R) -> Result<Direction, MazeError>
    where
        M: CollisionMap + ?Sized,
        R: Rng + ?Sized,
    {
        let decision = Decision {
            tile: self.tile,
            travel: Some(self.direction),
            mode: self.mode,
            flags: self.house.traversal_flags(),
            force_reverse: self.force_reverse,
            house: self.house,
        };
        let direction = select_direction(map, &decision, rng)?;

        self.direction = direction;
        self.force_reverse = false;
        self.needs_decision = false;
        Ok(direction)
    }

    /// Moves up to `distance` tiles, stopping at the next tile center.
    ///
    /// Returns the distance left over after reaching a center, or zero.
    pub fn travel<M: CollisionMap + ?Sized>(&mut self, map: &M, distance: f32) -> f32 {
        if self.needs_decision || distance <= 0.0 {
            return 0.0;
        }

        let to_center = 1.0 - self.progress;
        if distance < to_center {
            self.progress += distance;
            return 0.0;
        }

        self.tile = map.neighbor(self.tile, self.direction);
        self.progress = 0.0;
        self.needs_decision = true;
        trace!(tile = %self.tile, direction = self.direction.as_ref(), "Reached tile center");
        distance - to_center
    }

    /// Puts the actor back on a tile center, clearing any pending reversal and subscription.
    pub fn reset(&mut self, tile: TileIndex, direction: Direction, house: HouseArbitration) {
        *self = Self::new(tile, direction, house);
    }
}
