//! The ECS systems driving one simulation tick.
//!
//! They run chained in this order: [`scheduler_system`], [`ghost_behavior_system`],
//! [`ghost_movement_system`].

pub mod behavior;
pub mod components;
pub mod movement;
pub mod scheduler;

pub use self::behavior::ghost_behavior_system;
pub use self::components::*;
pub use self::movement::ghost_movement_system;
pub use self::scheduler::scheduler_system;
