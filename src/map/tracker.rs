//! Last-known grid positions of every tracked actor.

use bevy_ecs::resource::Resource;

use crate::ghost::Ghost;
use crate::map::direction::Direction;
use crate::map::tile::TileIndex;

/// Identifies an actor whose position is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorTag {
    Player,
    Ghost(Ghost),
}

impl ActorTag {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            ActorTag::Player => 0,
            ActorTag::Ghost(ghost) => 1 + ghost.as_index(),
        }
    }
}

/// A tracked tile and the direction the actor was travelling when it got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPosition {
    pub tile: TileIndex,
    pub direction: Direction,
}

/// Each actor writes only its own entry; targeting formulas read any entry.
#[derive(Resource, Debug, Clone, Default)]
pub struct PositionTracker {
    entries: [Option<TrackedPosition>; ActorTag::COUNT],
}

impl PositionTracker {
    pub fn publish(&mut self, tag: ActorTag, tile: TileIndex, direction: Direction) {
        self.entries[tag.index()] = Some(TrackedPosition { tile, direction });
    }

    pub fn get(&self, tag: ActorTag) -> Option<TrackedPosition> {
        self.entries[tag.index()]
    }

    pub fn position(&self, tag: ActorTag) -> Option<TileIndex> {
        self.get(tag).map(|tracked| tracked.tile)
    }

    pub fn direction(&self, tag: ActorTag) -> Option<Direction> {
        self.get(tag).map(|tracked| tracked.direction)
    }
}
