//! Centralized error types for the ghost engine.
//!
//! This module defines all error types used throughout the crate,
//! providing a consistent error handling approach.

use bevy_ecs::event::Event;

use crate::map::tile::TileIndex;

/// Main error type for the ghost engine.
///
/// This is the primary error type that should be used in public APIs.
/// Systems report fatal conditions by writing it as an event.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),
    #[error("Board row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
}

/// Errors describing a maze that ghosts cannot navigate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("No legal move from tile {0}, not even reversal")]
    NoLegalMove(TileIndex),

    #[error("Walkable tile {0} has no exits")]
    DeadTile(TileIndex),

    #[error("Walkable tile {0} cannot be reached from the player start")]
    Disconnected(TileIndex),
}

/// Errors in the session configuration, detected at startup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown ghost: {0}")]
    UnknownGhost(String),

    #[error("Ghost listed twice in the roster: {0}")]
    DuplicateGhost(String),

    #[error("Inky's targeting requires Blinky in the roster")]
    InkyWithoutBlinky,

    #[error("{what} tile {tile} is not walkable")]
    UnwalkableTile { what: &'static str, tile: TileIndex },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
