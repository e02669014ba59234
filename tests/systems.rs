use bevy_ecs::system::RunSystemOnce;
use ghost_engine::events::{GameCommand, GameEvent};
use ghost_engine::ghost::state::{BehaviorState, GhostBehavior};
use ghost_engine::ghost::Ghost;
use ghost_engine::map::tracker::{ActorTag, PositionTracker};
use ghost_engine::movement::controller::GridMover;
use ghost_engine::schedule::WaveScheduler;
use ghost_engine::systems::{ghost_behavior_system, ghost_movement_system, scheduler_system, DeltaTime, Frozen};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn start_level(world: &mut bevy_ecs::world::World, level: u32) {
    let events = world
        .resource_mut::<WaveScheduler>()
        .start_level(level, &Ghost::ALL);
    for event in events {
        common::send_game_event(world, event);
    }
}

#[test]
fn test_scheduler_system_applies_commands() {
    let mut world = common::create_test_world();
    start_level(&mut world, 1);
    common::drain_game_events(&mut world);

    common::send_game_command(&mut world, GameCommand::PowerPelletEaten);
    world
        .run_system_once(scheduler_system)
        .expect("System should run successfully");

    let events = common::drain_game_events(&mut world);
    assert_eq!(events, vec![GameEvent::PowerModeBegin]);
    assert_that(&world.resource::<WaveScheduler>().is_wave_paused()).is_true();
}

#[test]
fn test_scheduler_system_advances_timers() {
    let mut world = common::create_test_world();
    start_level(&mut world, 1);
    common::drain_game_events(&mut world);

    world.insert_resource(DeltaTime(7.0));
    world
        .run_system_once(scheduler_system)
        .expect("System should run successfully");

    let events = common::drain_game_events(&mut world);
    assert_that(&events.contains(&GameEvent::ChaseModeBegin { wave: 0 })).is_true();
}

#[test]
fn test_behavior_system_dispatches_to_every_ghost() {
    let mut world = common::create_test_world();
    let blinky = common::spawn_test_ghost(&mut world, Ghost::Blinky);
    let pinky = common::spawn_test_ghost(&mut world, Ghost::Pinky);

    common::send_game_event(&mut world, GameEvent::LevelStarted { level: 1 });
    common::send_game_event(&mut world, GameEvent::ChaseModeBegin { wave: 0 });
    world
        .run_system_once(ghost_behavior_system)
        .expect("System should run successfully");

    for entity in [blinky, pinky] {
        let behavior = world.get::<GhostBehavior>(entity).unwrap();
        assert_eq!(behavior.state(), BehaviorState::Chase { wave: 0 });
    }
}

#[test]
fn test_movement_system_skips_idle_ghosts() {
    let mut world = common::create_test_world();
    let blinky = common::spawn_test_ghost(&mut world, Ghost::Blinky);
    let before = world.get::<GridMover>(blinky).unwrap().clone();

    world
        .run_system_once(ghost_movement_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<GridMover>(blinky).unwrap(), &before);
}

#[test]
fn test_movement_system_moves_active_ghosts() {
    let mut world = common::create_test_world();
    let blinky = common::spawn_test_ghost(&mut world, Ghost::Blinky);
    let spawn = Ghost::Blinky.spawn_tile();

    common::send_game_event(&mut world, GameEvent::LevelStarted { level: 1 });
    world
        .run_system_once(ghost_behavior_system)
        .expect("System should run successfully");

    // Enough for several tiles
    world.insert_resource(DeltaTime(0.5));
    world
        .run_system_once(ghost_movement_system)
        .expect("System should run successfully");

    let mover = world.get::<GridMover>(blinky).unwrap();
    assert_that(&mover.tile).is_not_equal_to(spawn);

    let tracked = world.resource::<PositionTracker>().position(ActorTag::Ghost(Ghost::Blinky));
    assert_that(&tracked).is_some();
}

#[test]
fn test_movement_system_skips_frozen_ghosts() {
    let mut world = common::create_test_world();
    let blinky = common::spawn_test_ghost(&mut world, Ghost::Blinky);

    common::send_game_event(&mut world, GameEvent::LevelStarted { level: 1 });
    world
        .run_system_once(ghost_behavior_system)
        .expect("System should run successfully");
    world.entity_mut(blinky).insert(Frozen);

    let before = world.get::<GridMover>(blinky).unwrap().clone();
    world.insert_resource(DeltaTime(0.5));
    world
        .run_system_once(ghost_movement_system)
        .expect("System should run successfully");

    assert_eq!(world.get::<GridMover>(blinky).unwrap(), &before);
}
