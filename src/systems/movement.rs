use bevy_ecs::event::EventWriter;
use bevy_ecs::query::Without;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::error;

use crate::config::EngineConfig;
use crate::error::GameError;
use crate::ghost::state::{BehaviorContext, BehaviorState, GhostBehavior};
use crate::map::maze::Maze;
use crate::map::tracker::{ActorTag, PositionTracker};
use crate::movement::controller::GridMover;
use crate::schedule::WaveScheduler;
use crate::systems::components::{DeltaTime, Frozen, GhostRng};

/// Moves every ghost along the grid, deciding a new direction at each tile center.
///
/// Each ghost publishes its own tracked position whenever it reaches a tile center.
/// A ghost with no legal move stops for the rest of the tick and reports a [`GameError`].
#[allow(clippy::too_many_arguments)]
pub fn ghost_movement_system(
    maze: Res<Maze>,
    delta_time: Res<DeltaTime>,
    config: Res<EngineConfig>,
    scheduler: Res<WaveScheduler>,
    mut tracker: ResMut<PositionTracker>,
    mut rng: ResMut<GhostRng>,
    mut errors: EventWriter<GameError>,
    mut ghosts: Query<(&mut GhostBehavior, &mut GridMover), Without<Frozen>>,
) {
    let modes = scheduler.snapshot();

    for (mut behavior, mut mover) in ghosts.iter_mut() {
        if behavior.state() == BehaviorState::Idle {
            continue;
        }
        let ghost = behavior.ghost();
        let mut distance = config.ghost_speed * mover.speed_multiplier * delta_time.0;

        loop {
            if mover.needs_decision() {
                let ctx = BehaviorContext {
                    tracker: &tracker,
                    modes,
                    speeds: config.speeds,
                };
                behavior.on_tile_center(&mut mover, &ctx);

                if let Err(e) = mover.decide(&*maze, &mut rng.0) {
                    error!(ghost = %ghost, tile = %mover.tile, error = %e, "Ghost cannot move");
                    errors.write(e.into());
                    break;
                }
            }

            distance = mover.travel(&*maze, distance);
            if mover.needs_decision() {
                tracker.publish(ActorTag::Ghost(ghost), mover.tile, mover.direction);
            }
            if distance <= 0.0 {
                break;
            }
        }
    }
}
