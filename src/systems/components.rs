use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ghost::state::GhostBehavior;
use crate::ghost::Ghost;
use crate::movement::controller::{GridMover, HouseArbitration};

/// A tag component for ghosts whose movement is suspended.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Frozen;

/// Seconds elapsed since the previous tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime(pub f32);

/// Source of randomness for Random-mode direction choices.
#[derive(Resource, Debug, Clone)]
pub struct GhostRng(pub SmallRng);

impl GhostRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub behavior: GhostBehavior,
    pub mover: GridMover,
}

impl GhostBundle {
    /// A ghost at its spawn tile, idle until the level starts.
    pub fn new(ghost: Ghost) -> Self {
        Self {
            ghost,
            behavior: GhostBehavior::new(ghost),
            mover: GridMover::new(ghost.spawn_tile(), ghost.spawn_direction(), spawn_house(ghost)),
        }
    }
}

/// House permissions a ghost has at every level (re)start.
pub fn spawn_house(ghost: Ghost) -> HouseArbitration {
    if ghost.starts_locked() {
        HouseArbitration::locked()
    } else {
        HouseArbitration::default()
    }
}
