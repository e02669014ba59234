//! This module contains the game session: the ECS world, its schedule and the
//! entry points used by collaborators.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventCursor, EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use tracing::{debug, info, trace};

use crate::config::{validate_roster, EngineConfig};
use crate::constants::{house, RAW_BOARD};
use crate::error::{ConfigError, GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::ghost::state::{BehaviorContext, BehaviorState, GhostBehavior};
use crate::ghost::Ghost;
use crate::map::direction::Direction;
use crate::map::maze::Maze;
use crate::map::tile::TileIndex;
use crate::map::tracker::{ActorTag, PositionTracker};
use crate::movement::controller::GridMover;
use crate::schedule::{ModeSnapshot, WaveScheduler};
use crate::systems::{
    ghost_behavior_system, ghost_movement_system, scheduler_system, spawn_house, DeltaTime, Frozen, GhostBundle, GhostRng,
};

/// One game session built on the Bevy ECS.
///
/// The `World` holds the maze, the wave scheduler, the position tracker and one
/// entity per ghost; the `Schedule` runs the scheduler, behavior and movement
/// systems in that order on every tick.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    ghosts: [Option<Entity>; 4],
    frozen: bool,
    event_cursor: EventCursor<GameEvent>,
}

impl Game {
    /// Creates a session on the standard board.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the roster is invalid or the maze fails validation.
    pub fn new(config: EngineConfig) -> GameResult<Game> {
        Self::with_board(config, &RAW_BOARD)
    }

    /// Creates a session on a custom board.
    pub fn with_board(config: EngineConfig, board: &[&str]) -> GameResult<Game> {
        info!(roster = ?config.roster, seed = config.seed, "Starting ghost engine initialization");

        validate_roster(&config.roster)?;
        let maze = Maze::new(board)?;
        Self::validate_ghost_tiles(&maze, &config.roster)?;

        let mut world = World::default();
        let mut schedule = Schedule::default();
        Self::setup_ecs(&mut world);
        Self::configure_schedule(&mut schedule);

        let mut tracker = PositionTracker::default();
        tracker.publish(ActorTag::Player, maze.player_start(), Direction::Left);

        world.insert_resource(WaveScheduler::new(&config));
        world.insert_resource(GhostRng::seeded(config.seed));
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(maze);

        let mut ghosts = [None; 4];
        for ghost in config.roster.iter().copied() {
            let entity = world.spawn(GhostBundle::new(ghost)).id();
            tracker.publish(ActorTag::Ghost(ghost), ghost.spawn_tile(), ghost.spawn_direction());
            ghosts[ghost.as_index()] = Some(entity);
            trace!(%ghost, ?entity, tile = %ghost.spawn_tile(), "Spawned ghost entity");
        }

        world.insert_resource(tracker);
        world.insert_resource(config);

        info!("Ghost engine initialized");
        Ok(Game {
            world,
            schedule,
            ghosts,
            frozen: false,
            event_cursor: EventCursor::default(),
        })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<GameCommand>(world);
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule.add_systems((scheduler_system, ghost_behavior_system, ghost_movement_system).chain());
    }

    /// Every tile a ghost is sent to must be walkable.
    fn validate_ghost_tiles(maze: &Maze, roster: &[Ghost]) -> Result<(), ConfigError> {
        let house_tiles = [
            ("house exit", house::EXIT),
            ("house rally", house::RALLY),
            ("house respawn", house::RESPAWN),
        ];
        let ghost_tiles = roster.iter().flat_map(|ghost| {
            std::iter::once(("spawn", ghost.spawn_tile()))
                .chain(ghost.scatter_path().iter().map(|tile| ("scatter waypoint", *tile)))
        });

        for (what, tile) in house_tiles.into_iter().chain(ghost_tiles) {
            if !maze.is_walkable(tile) {
                return Err(ConfigError::UnwalkableTile { what, tile });
            }
        }
        Ok(())
    }

    /// Starts (or restarts) a level: ghosts go back to their spawn tiles, idle and
    /// locked, and every timer is reset.
    pub fn start_level(&mut self, level: u32) {
        let roster = self.world.resource::<EngineConfig>().roster.clone();
        let events = self.world.resource_mut::<WaveScheduler>().start_level(level, &roster);

        let tracker = self.world.resource::<PositionTracker>().clone();
        let modes = self.world.resource::<WaveScheduler>().snapshot();
        let speeds = self.world.resource::<EngineConfig>().speeds;
        let ctx = BehaviorContext {
            tracker: &tracker,
            modes,
            speeds,
        };

        let mut query = self.world.query::<(&Ghost, &mut GhostBehavior, &mut GridMover)>();
        let mut placed = Vec::with_capacity(roster.len());
        for (ghost, mut behavior, mut mover) in query.iter_mut(&mut self.world) {
            mover.reset(ghost.spawn_tile(), ghost.spawn_direction(), spawn_house(*ghost));
            behavior.set_state(BehaviorState::Idle, &mut mover, &ctx);
            placed.push((*ghost, mover.tile, mover.direction));
        }

        let mut tracker = self.world.resource_mut::<PositionTracker>();
        for (ghost, tile, direction) in placed {
            tracker.publish(ActorTag::Ghost(ghost), tile, direction);
        }

        self.world.resource_mut::<Events<GameEvent>>().send_batch(events);
    }

    /// Executes one tick of the simulation.
    ///
    /// # Errors
    ///
    /// Returns the first `GameError` reported by a system during the tick, such as a
    /// ghost finding no legal move. A non-finite `dt` is rejected before anything runs.
    pub fn tick(&mut self, dt: f32) -> GameResult<()> {
        if !dt.is_finite() {
            return Err(GameError::InvalidState(format!("non-finite tick delta {dt}")));
        }
        self.world.insert_resource(DeltaTime(dt));
        self.schedule.run(&mut self.world);
        formatter::increment_tick();

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<GameCommand>>().update();

        match self.world.resource_mut::<Events<GameError>>().drain().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Records the player's new tile and announces it on the bus.
    pub fn move_player(&mut self, tile: TileIndex, direction: Direction) {
        self.world
            .resource_mut::<PositionTracker>()
            .publish(ActorTag::Player, tile, direction);
        self.world
            .resource_mut::<Events<GameEvent>>()
            .send(GameEvent::PlayerMoved { tile, direction });
    }

    pub fn power_pellet_eaten(&mut self) {
        self.send_command(GameCommand::PowerPelletEaten);
    }

    /// Grants Super mode for `seconds`, or the configured default.
    pub fn super_item_collected(&mut self, seconds: Option<f32>) {
        let seconds = seconds.unwrap_or(self.world.resource::<EngineConfig>().super_seconds);
        self.send_command(GameCommand::SuperItemCollected { seconds });
    }

    pub fn send_command(&mut self, command: GameCommand) {
        self.world.resource_mut::<Events<GameCommand>>().send(command);
    }

    /// Collision resolution: the player caught `ghost`.
    ///
    /// Returns `true` if the ghost was Frightened and is now Eaten.
    pub fn ghost_eaten(&mut self, ghost: Ghost) -> GameResult<bool> {
        let eaten = self.handle_ghost_event(ghost, &GameEvent::GhostEaten(ghost))?;
        if eaten {
            debug!(%ghost, "Ghost eaten");
            self.world
                .resource_mut::<Events<GameEvent>>()
                .send(GameEvent::GhostEaten(ghost));
        }
        Ok(eaten)
    }

    /// Delivers an event to one ghost immediately. Returns whether its state changed.
    pub fn handle_ghost_event(&mut self, ghost: Ghost, event: &GameEvent) -> GameResult<bool> {
        self.with_ghost(ghost, |behavior, mover, ctx| behavior.handle_event(event, mover, ctx))
    }

    /// Forces a ghost into a state, running the exit and entry hooks.
    pub fn set_ghost_state(&mut self, ghost: Ghost, state: BehaviorState) -> GameResult<()> {
        self.with_ghost(ghost, |behavior, mover, ctx| behavior.set_state(state, mover, ctx))
    }

    fn with_ghost<R>(
        &mut self,
        ghost: Ghost,
        f: impl FnOnce(&mut GhostBehavior, &mut GridMover, &BehaviorContext) -> R,
    ) -> GameResult<R> {
        let entity = self.entity(ghost)?;
        let tracker = self.world.resource::<PositionTracker>().clone();
        let ctx = BehaviorContext {
            tracker: &tracker,
            modes: self.world.resource::<WaveScheduler>().snapshot(),
            speeds: self.world.resource::<EngineConfig>().speeds,
        };

        let mut query = self.world.query::<(&mut GhostBehavior, &mut GridMover)>();
        let (mut behavior, mut mover) = query
            .get_mut(&mut self.world, entity)
            .map_err(|e| GameError::InvalidState(e.to_string()))?;
        Ok(f(&mut behavior, &mut mover, &ctx))
    }

    fn entity(&self, ghost: Ghost) -> GameResult<Entity> {
        self.ghosts[ghost.as_index()].ok_or_else(|| GameError::InvalidState(format!("{ghost} is not in the roster")))
    }

    /// Suspends or resumes ghost movement. Scheduler timers keep running.
    pub fn set_frozen(&mut self, frozen: bool) {
        if self.frozen == frozen {
            return;
        }
        self.frozen = frozen;
        debug!(frozen, "Ghost movement freeze changed");

        for ghost in Ghost::ALL {
            let Ok(entity) = self.entity(ghost) else {
                continue;
            };
            if frozen {
                self.world.entity_mut(entity).insert(Frozen);
                let _ = self.with_ghost(ghost, |behavior, mover, _| behavior.on_pause(mover));
            } else {
                self.world.entity_mut(entity).remove::<Frozen>();
                let _ = self.with_ghost(ghost, |behavior, mover, ctx| behavior.on_resume(mover, ctx));
            }
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The current behavior of a ghost (`None` if it is not in the roster).
    pub fn ghost_state(&self, ghost: Ghost) -> Option<BehaviorState> {
        self.ghost_component::<GhostBehavior>(ghost).map(GhostBehavior::state)
    }

    pub fn ghost_tile(&self, ghost: Ghost) -> Option<TileIndex> {
        self.ghost_component::<GridMover>(ghost).map(|mover| mover.tile)
    }

    /// The mover of a ghost, for inspection.
    pub fn ghost_mover(&self, ghost: Ghost) -> Option<&GridMover> {
        self.ghost_component::<GridMover>(ghost)
    }

    fn ghost_component<T: bevy_ecs::component::Component>(&self, ghost: Ghost) -> Option<&T> {
        self.ghosts[ghost.as_index()].and_then(|entity| self.world.get::<T>(entity))
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        self.world.resource::<WaveScheduler>()
    }

    pub fn snapshot(&self) -> ModeSnapshot {
        self.scheduler().snapshot()
    }

    pub fn tracker(&self) -> &PositionTracker {
        self.world.resource::<PositionTracker>()
    }

    /// Bus events published since the previous call, oldest first.
    ///
    /// Events older than the previous tick are no longer retained.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        let events = self.world.resource::<Events<GameEvent>>();
        self.event_cursor.read(events).copied().collect()
    }
}
