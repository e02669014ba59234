use bevy_ecs::prelude::*;

use crate::ghost::Ghost;
use crate::map::direction::Direction;
use crate::map::tile::TileIndex;

/// Requests from collaborators, applied by the scheduler at the start of the next tick.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    PowerPelletEaten,
    SuperItemCollected { seconds: f32 },
    ExpirePower,
    ExpireSuper,
}

/// The game event bus.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    ScatterModeBegin { wave: u8 },
    ScatterModeEnd { wave: u8 },
    ChaseModeBegin { wave: u8 },
    ChaseModeEnd { wave: u8 },
    PowerModeBegin,
    PowerModeEnd,
    SuperModeBegin,
    SuperModeEnd,
    HouseReleased(Ghost),
    GhostEaten(Ghost),
    PlayerMoved { tile: TileIndex, direction: Direction },
}
