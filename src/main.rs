//! Headless driver: runs one level with a scripted player and logs what the ghosts do.

use anyhow::Context;
use figment::{providers::Env, Figment};
use ghost_engine::config::EngineConfig;
use ghost_engine::constants::{LOOP_TIME, TICK_RATE};
use ghost_engine::game::Game;
use ghost_engine::ghost::Ghost;
use ghost_engine::logging::setup_logging;
use ghost_engine::map::direction::Direction;
use ghost_engine::map::maze::{CollisionMap, Maze, TraversalFlags};
use ghost_engine::map::tile::TileIndex;
use serde::Deserialize;
use tracing::{info, warn};

/// Player speed of the autopilot, in tiles per second.
const AUTOPILOT_SPEED: f32 = 8.0;

#[derive(Debug, Deserialize)]
struct RunOptions {
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default = "default_seconds")]
    seconds: f32,
    /// Seconds into the run at which the player eats a power pellet
    #[serde(default = "default_power_at")]
    power_at: f32,
    /// Seconds into the run at which the player collects a super item
    #[serde(default = "default_super_at")]
    super_at: f32,
}

fn default_level() -> u32 {
    1
}

fn default_seconds() -> f32 {
    60.0
}

fn default_power_at() -> f32 {
    30.0
}

fn default_super_at() -> f32 {
    45.0
}

/// Walks straight ahead, turning at walls by the fixed direction priority.
struct Autopilot {
    maze: Maze,
    tile: TileIndex,
    direction: Direction,
    progress: f32,
}

impl Autopilot {
    fn new(maze: Maze) -> Self {
        let tile = maze.player_start();
        Self {
            maze,
            tile,
            direction: Direction::Left,
            progress: 0.0,
        }
    }

    /// Returns the new tile when the player crosses into one.
    fn advance(&mut self, dt: f32) -> Option<(TileIndex, Direction)> {
        self.progress += AUTOPILOT_SPEED * dt;
        if self.progress < 1.0 {
            return None;
        }
        self.progress -= 1.0;

        if self.maze.is_blocked(self.tile, self.direction, TraversalFlags::PLAYER) {
            let reverse = self.direction.opposite();
            self.direction = Direction::PRIORITY
                .into_iter()
                .filter(|direction| *direction != reverse)
                .find(|direction| !self.maze.is_blocked(self.tile, *direction, TraversalFlags::PLAYER))
                .unwrap_or(reverse);
        }
        self.tile = self.maze.neighbor(self.tile, self.direction);
        Some((self.tile, self.direction))
    }
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = EngineConfig::from_env().context("Failed to load engine configuration")?;
    let options: RunOptions = Figment::new()
        .merge(Env::prefixed("GHOST_"))
        .extract()
        .context("Failed to load run options")?;
    info!(?options, "Starting headless run");

    let mut game = Game::new(config)?;
    let mut autopilot = Autopilot::new(game.world.resource::<Maze>().clone());
    game.start_level(options.level);

    let dt = LOOP_TIME.as_secs_f32();
    let total_ticks = (options.seconds.max(0.0) * TICK_RATE as f32) as u64;
    let power_tick = (options.power_at * TICK_RATE as f32) as u64;
    let super_tick = (options.super_at * TICK_RATE as f32) as u64;

    for tick in 0..total_ticks {
        if tick == power_tick {
            game.power_pellet_eaten();
        }
        if tick == super_tick {
            game.super_item_collected(None);
        }
        if let Some((tile, direction)) = autopilot.advance(dt) {
            game.move_player(tile, direction);
        }

        game.tick(dt)?;

        for event in game.take_events() {
            info!(?event, "Event");
        }

        for ghost in Ghost::ALL {
            let Some(state) = game.ghost_state(ghost) else {
                continue;
            };
            if game.ghost_tile(ghost) != Some(autopilot.tile) {
                continue;
            }
            if state.is_vulnerable() {
                game.ghost_eaten(ghost)?;
            } else if state.is_dangerous() {
                warn!(%ghost, tile = %autopilot.tile, "Player caught");
            }
        }
    }

    let snapshot = game.snapshot();
    info!(
        level = snapshot.level,
        wave = snapshot.wave,
        phase = %snapshot.phase,
        "Run finished"
    );
    for ghost in Ghost::ALL {
        if let (Some(state), Some(tile)) = (game.ghost_state(ghost), game.ghost_tile(ghost)) {
            info!(%ghost, state = %state.kind(), %tile, "Final ghost state");
        }
    }
    Ok(())
}
