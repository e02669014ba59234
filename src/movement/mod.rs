//! Grid movement and the direction decision made at each tile center.

pub mod controller;
pub mod selection;
