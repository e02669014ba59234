#![allow(dead_code)]

use std::collections::HashSet;

use bevy_ecs::{entity::Entity, event::Events, world::World};
use ghost_engine::{
    config::{EngineConfig, DEFAULT_SEED},
    constants::RAW_BOARD,
    error::GameError,
    events::{GameCommand, GameEvent},
    game::Game,
    ghost::{state::BehaviorContext, Ghost},
    map::{
        direction::Direction,
        maze::{CollisionMap, Maze, Obstacle, TraversalFlags},
        tile::TileIndex,
        tracker::{ActorTag, PositionTracker},
    },
    movement::controller::HouseArbitration,
    schedule::{ModeSnapshot, WaveScheduler},
    systems::{DeltaTime, GhostBundle, GhostRng},
};

/// An unbounded open grid where only the listed moves are walled off.
#[derive(Debug, Default)]
pub struct TestMap {
    walls: HashSet<(TileIndex, Direction)>,
    house: HashSet<TileIndex>,
    no_downward_exit: Vec<TileIndex>,
}

impl TestMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walls off every direction out of `tile` except the listed ones.
    pub fn only_exits(mut self, tile: TileIndex, exits: &[Direction]) -> Self {
        for direction in Direction::DIRECTIONS {
            if !exits.contains(&direction) {
                self.walls.insert((tile, direction));
            }
        }
        self
    }

    pub fn with_house(mut self, tiles: &[TileIndex]) -> Self {
        self.house.extend(tiles.iter().copied());
        self
    }

    pub fn with_no_downward_exit(mut self, tile: TileIndex) -> Self {
        self.no_downward_exit.push(tile);
        self
    }
}

impl CollisionMap for TestMap {
    fn neighbor(&self, tile: TileIndex, direction: Direction) -> TileIndex {
        tile.step(direction, 1)
    }

    fn obstacle(&self, tile: TileIndex, direction: Direction, _flags: TraversalFlags) -> Option<Obstacle> {
        self.walls.contains(&(tile, direction)).then_some(Obstacle::Wall)
    }

    fn forbids_downward_exit(&self, tile: TileIndex) -> bool {
        self.no_downward_exit.contains(&tile)
    }

    fn is_in_house(&self, tile: TileIndex) -> bool {
        self.house.contains(&tile)
    }
}

/// House permissions of a free ghost whose rally and exit points are set for [`TestMap`].
pub fn free_house() -> HouseArbitration {
    HouseArbitration {
        rally: TileIndex::new(20, 20),
        exit: TileIndex::new(0, 20),
        ..HouseArbitration::default()
    }
}

pub fn create_test_maze() -> Maze {
    Maze::new(&RAW_BOARD).expect("Failed to create test maze")
}

/// Creates a basic test world with the resources the engine systems need.
pub fn create_test_world() -> World {
    let config = EngineConfig::default();
    let maze = create_test_maze();

    let mut tracker = PositionTracker::default();
    tracker.publish(ActorTag::Player, maze.player_start(), Direction::Left);

    let mut world = World::new();
    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameCommand>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(DeltaTime(1.0 / 60.0));
    world.insert_resource(WaveScheduler::new(&config));
    world.insert_resource(GhostRng::seeded(DEFAULT_SEED));
    world.insert_resource(tracker);
    world.insert_resource(maze);
    world.insert_resource(config);

    world
}

pub fn spawn_test_ghost(world: &mut World, ghost: Ghost) -> Entity {
    world.spawn(GhostBundle::new(ghost)).id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.resource_mut::<Events<GameEvent>>().send(event);
}

pub fn send_game_command(world: &mut World, command: GameCommand) {
    world.resource_mut::<Events<GameCommand>>().send(command);
}

/// Drains every pending bus event, oldest first.
pub fn drain_game_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

/// A behavior context with the player at `player` and no global modes active.
pub fn context(tracker: &PositionTracker) -> BehaviorContext<'_> {
    context_with(tracker, ModeSnapshot::default())
}

pub fn context_with(tracker: &PositionTracker, modes: ModeSnapshot) -> BehaviorContext<'_> {
    BehaviorContext {
        tracker,
        modes,
        speeds: EngineConfig::default().speeds,
    }
}

pub fn tracker_with_player(tile: TileIndex, direction: Direction) -> PositionTracker {
    let mut tracker = PositionTracker::default();
    tracker.publish(ActorTag::Player, tile, direction);
    tracker
}

/// A session on the standard board with the default configuration.
pub fn create_test_game() -> Game {
    Game::new(EngineConfig::default()).expect("Failed to create test game")
}

/// Ticks the game `count` times by `dt`, returning every event published along the way.
pub fn run_ticks(game: &mut Game, count: usize, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..count {
        game.tick(dt).expect("Tick should not fail");
        events.extend(game.take_events());
    }
    events
}
