use bevy_ecs::event::EventReader;
use bevy_ecs::system::{Query, Res};
use tracing::trace;

use crate::config::EngineConfig;
use crate::events::GameEvent;
use crate::ghost::state::{BehaviorContext, GhostBehavior};
use crate::map::tracker::PositionTracker;
use crate::movement::controller::GridMover;
use crate::schedule::WaveScheduler;

/// Dispatches every bus event, in order, to every ghost's state machine.
pub fn ghost_behavior_system(
    mut events: EventReader<GameEvent>,
    tracker: Res<PositionTracker>,
    scheduler: Res<WaveScheduler>,
    config: Res<EngineConfig>,
    mut ghosts: Query<(&mut GhostBehavior, &mut GridMover)>,
) {
    let ctx = BehaviorContext {
        tracker: &tracker,
        modes: scheduler.snapshot(),
        speeds: config.speeds,
    };

    for event in events.read() {
        trace!(?event, "Dispatching event to ghosts");
        for (mut behavior, mut mover) in ghosts.iter_mut() {
            behavior.handle_event(event, &mut mover, &ctx);
        }
    }
}
