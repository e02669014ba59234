use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::system::{Res, ResMut};

use crate::events::{GameCommand, GameEvent};
use crate::schedule::WaveScheduler;
use crate::systems::components::DeltaTime;

/// Applies queued commands to the wave scheduler, advances its timers and
/// publishes the resulting events.
///
/// Runs first in the tick so that every behavior sees this tick's mode changes.
pub fn scheduler_system(
    delta_time: Res<DeltaTime>,
    mut scheduler: ResMut<WaveScheduler>,
    mut commands: EventReader<GameCommand>,
    mut events: EventWriter<GameEvent>,
) {
    for command in commands.read() {
        let produced = match *command {
            GameCommand::PowerPelletEaten => scheduler.begin_power(),
            GameCommand::SuperItemCollected { seconds } => scheduler.begin_super(seconds),
            GameCommand::ExpirePower => scheduler.expire_power(),
            GameCommand::ExpireSuper => scheduler.expire_super(),
        };
        events.write_batch(produced);
    }

    events.write_batch(scheduler.update(delta_time.0));
}
