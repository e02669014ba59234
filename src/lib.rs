//! Ghost behavior engine: per-ghost state machines, grid direction selection and
//! the wave scheduler that keeps them in lockstep.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod ghost;
pub mod logging;
pub mod map;
pub mod movement;
pub mod schedule;
pub mod systems;
