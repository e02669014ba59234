//! The maze grid and the obstacle queries used by grid movement.

use std::collections::HashSet;

use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use pathfinding::prelude::bfs_reach;
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{house, PLAYER_START};
use crate::error::{GameResult, MazeError};
use crate::map::direction::Direction;
use crate::map::parser::{MapTile, MapTileParser};
use crate::map::tile::TileIndex;

bitflags! {
    /// Which kinds of tiles an actor may enter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TraversalFlags: u8 {
        const WALKWAY = 1 << 0;
        const HOUSE_DOOR = 1 << 1;

        const PLAYER = Self::WALKWAY.bits();
        const GHOST = Self::WALKWAY.bits() | Self::HOUSE_DOOR.bits();
    }
}

/// What stops an actor from moving in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    Door,
    OutOfBounds,
}

/// Obstacle and topology queries consumed by the direction selection algorithm.
pub trait CollisionMap {
    /// The tile reached by moving one step in `direction`, after any tunnel wrapping.
    fn neighbor(&self, tile: TileIndex, direction: Direction) -> TileIndex;

    /// The obstacle preventing an actor with `flags` from moving from `tile` towards `direction`.
    fn obstacle(&self, tile: TileIndex, direction: Direction, flags: TraversalFlags) -> Option<Obstacle>;

    fn is_blocked(&self, tile: TileIndex, direction: Direction, flags: TraversalFlags) -> bool {
        self.obstacle(tile, direction, flags).is_some()
    }

    /// Whether `tile` is one of the special tiles that forbid leaving downwards.
    fn forbids_downward_exit(&self, tile: TileIndex) -> bool;

    /// Whether `tile` lies inside the ghost house (door included).
    fn is_in_house(&self, tile: TileIndex) -> bool;
}

/// The parsed, validated maze.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    tiles: Vec<Vec<MapTile>>,
    width: i32,
    height: i32,
    house_door: [TileIndex; 2],
    player_start: TileIndex,
    no_downward_exit: SmallVec<[TileIndex; 4]>,
}

impl Maze {
    /// Parses and validates a board, using the standard no-downward-exit tiles.
    pub fn new(raw_board: &[&str]) -> GameResult<Self> {
        Self::with_no_downward_exits(raw_board, &house::NO_DOWNWARD_EXIT)
    }

    pub fn with_no_downward_exits(raw_board: &[&str], no_downward_exit: &[TileIndex]) -> GameResult<Self> {
        let parsed = MapTileParser::parse_board(raw_board)?;

        let height = parsed.tiles.len() as i32;
        let width = parsed.tiles.first().map(|row| row.len()).unwrap_or(0) as i32;
        // The parser guarantees exactly two door tiles
        let house_door = [
            parsed.house_door[0].unwrap_or_default(),
            parsed.house_door[1].unwrap_or_default(),
        ];

        let maze = Self {
            tiles: parsed.tiles,
            width,
            height,
            house_door,
            player_start: parsed.player_start.unwrap_or(PLAYER_START),
            no_downward_exit: no_downward_exit.iter().copied().collect(),
        };
        maze.validate()?;

        debug!(width, height, "Maze parsed and validated");
        Ok(maze)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn house_door(&self) -> [TileIndex; 2] {
        self.house_door
    }

    pub fn player_start(&self) -> TileIndex {
        self.player_start
    }

    pub fn in_bounds(&self, tile: TileIndex) -> bool {
        (0..self.height).contains(&tile.row) && (0..self.width).contains(&tile.col)
    }

    /// Returns the tile kind at a position, or `None` outside the board.
    pub fn tile(&self, tile: TileIndex) -> Option<MapTile> {
        if !self.in_bounds(tile) {
            return None;
        }
        Some(self.tiles[tile.row as usize][tile.col as usize])
    }

    pub fn is_walkable(&self, tile: TileIndex) -> bool {
        self.tile(tile).is_some_and(MapTile::is_walkable)
    }

    /// Iterates over every walkable tile.
    pub fn walkable_tiles(&self) -> impl Iterator<Item = TileIndex> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| TileIndex::new(row, col)))
            .filter(|tile| self.is_walkable(*tile))
    }

    /// Checks that ghosts can always move: every walkable tile has an exit and
    /// every walkable tile can be reached from the player's start.
    pub fn validate(&self) -> Result<(), MazeError> {
        for tile in self.walkable_tiles() {
            let has_exit = Direction::DIRECTIONS
                .iter()
                .any(|direction| !self.is_blocked(tile, *direction, TraversalFlags::GHOST));
            if !has_exit {
                return Err(MazeError::DeadTile(tile));
            }
        }

        if !self.is_walkable(self.player_start) {
            return Err(MazeError::Disconnected(self.player_start));
        }

        let reachable: HashSet<TileIndex> = bfs_reach(self.player_start, |tile| {
            let tile = *tile;
            Direction::DIRECTIONS
                .iter()
                .filter(move |direction| !self.is_blocked(tile, **direction, TraversalFlags::GHOST))
                .map(move |direction| self.neighbor(tile, *direction))
                .collect::<SmallVec<[TileIndex; 4]>>()
        })
        .collect();

        match self.walkable_tiles().find(|tile| !reachable.contains(tile)) {
            Some(tile) => Err(MazeError::Disconnected(tile)),
            None => Ok(()),
        }
    }
}

impl CollisionMap for Maze {
    fn neighbor(&self, tile: TileIndex, direction: Direction) -> TileIndex {
        let next = tile.step(direction, 1);
        let leaves_board = next.col < 0 || next.col >= self.width;
        if leaves_board && !direction.is_vertical() && self.tile(tile) == Some(MapTile::Tunnel) {
            return TileIndex::new(next.row, next.col.rem_euclid(self.width));
        }
        next
    }

    fn obstacle(&self, tile: TileIndex, direction: Direction, flags: TraversalFlags) -> Option<Obstacle> {
        match self.tile(self.neighbor(tile, direction)) {
            None => Some(Obstacle::OutOfBounds),
            Some(MapTile::Wall) => Some(Obstacle::Wall),
            Some(MapTile::Door) if !flags.contains(TraversalFlags::HOUSE_DOOR) => Some(Obstacle::Door),
            Some(MapTile::Door) => None,
            Some(_) if !flags.contains(TraversalFlags::WALKWAY) => Some(Obstacle::Wall),
            Some(_) => None,
        }
    }

    fn forbids_downward_exit(&self, tile: TileIndex) -> bool {
        self.no_downward_exit.contains(&tile)
    }

    fn is_in_house(&self, tile: TileIndex) -> bool {
        matches!(self.tile(tile), Some(MapTile::House | MapTile::Door))
    }
}
