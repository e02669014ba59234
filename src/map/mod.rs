//! This module contains all the code related to the maze grid.

pub mod direction;
pub mod maze;
pub mod parser;
pub mod tile;
pub mod tracker;
