//! The per-ghost behavior state machine.
//!
//! A ghost is always in exactly one [`BehaviorState`]. Transitions replace the state
//! value, running the outgoing state's exit hook before the incoming state's entry hook.
//! Temporary states carry a [`ResumeTarget`] naming the wave phase to return to.

use bevy_ecs::component::Component;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{debug, trace};

use crate::config::SpeedMultipliers;
use crate::constants::house;
use crate::events::GameEvent;
use crate::ghost::targeting::chase_target;
use crate::ghost::Ghost;
use crate::map::tile::TileIndex;
use crate::map::tracker::PositionTracker;
use crate::movement::controller::{GridMover, TargetingMode};
use crate::schedule::ModeSnapshot;

/// The wave phase a temporary state returns to when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeTarget {
    Scatter { wave: u8 },
    Chase { wave: u8 },
}

impl ResumeTarget {
    /// The state entered when resuming.
    pub fn into_state(self) -> BehaviorState {
        match self {
            ResumeTarget::Scatter { wave } => BehaviorState::Scatter { wave, waypoint: 0 },
            ResumeTarget::Chase { wave } => BehaviorState::Chase { wave },
        }
    }
}

/// A ghost's current behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BehaviorState {
    /// Waiting for the level to start.
    #[default]
    Idle,
    /// Touring the home corner's loop; `waypoint` indexes [`Ghost::scatter_path`].
    Scatter { wave: u8, waypoint: usize },
    Chase { wave: u8 },
    /// Vulnerable and wandering randomly while Power mode lasts.
    Frightened { resume: ResumeTarget },
    /// Returning to the house to be revived.
    Eaten { resume: ResumeTarget },
    /// Wandering randomly while the player holds Super mode.
    Roam { resume: ResumeTarget },
}

/// The name of a [`BehaviorState`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BehaviorKind {
    Idle,
    Scatter,
    Chase,
    Frightened,
    Eaten,
    Roam,
}

impl BehaviorState {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            BehaviorState::Idle => BehaviorKind::Idle,
            BehaviorState::Scatter { .. } => BehaviorKind::Scatter,
            BehaviorState::Chase { .. } => BehaviorKind::Chase,
            BehaviorState::Frightened { .. } => BehaviorKind::Frightened,
            BehaviorState::Eaten { .. } => BehaviorKind::Eaten,
            BehaviorState::Roam { .. } => BehaviorKind::Roam,
        }
    }

    /// The wave phase this state belongs to or will return to.
    pub fn family(&self) -> Option<ResumeTarget> {
        match *self {
            BehaviorState::Idle => None,
            BehaviorState::Scatter { wave, .. } => Some(ResumeTarget::Scatter { wave }),
            BehaviorState::Chase { wave } => Some(ResumeTarget::Chase { wave }),
            BehaviorState::Frightened { resume } | BehaviorState::Eaten { resume } | BehaviorState::Roam { resume } => {
                Some(resume)
            }
        }
    }

    /// Whether the player can eat a ghost in this state.
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, BehaviorState::Frightened { .. })
    }

    /// Whether touching a ghost in this state costs the player a life.
    pub fn is_dangerous(&self) -> bool {
        matches!(
            self,
            BehaviorState::Scatter { .. } | BehaviorState::Chase { .. } | BehaviorState::Roam { .. }
        )
    }
}

/// Switching between these states turns the ghost around.
fn reverses_on_switch(from: BehaviorState, to: BehaviorState) -> bool {
    use BehaviorKind::*;
    matches!(
        (from.kind(), to.kind()),
        (Scatter, Chase) | (Chase, Scatter) | (Scatter | Chase | Roam, Frightened) | (Scatter | Chase, Roam)
    )
}

/// Read-only session data the state machine consults.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorContext<'a> {
    pub tracker: &'a PositionTracker,
    pub modes: ModeSnapshot,
    pub speeds: SpeedMultipliers,
}

/// The behavior state machine of one ghost.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct GhostBehavior {
    ghost: Ghost,
    state: BehaviorState,
}

impl GhostBehavior {
    pub fn new(ghost: Ghost) -> Self {
        Self {
            ghost,
            state: BehaviorState::Idle,
        }
    }

    pub fn ghost(&self) -> Ghost {
        self.ghost
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    /// Replaces the current state, running the exit and entry hooks.
    pub fn set_state(&mut self, next: BehaviorState, mover: &mut GridMover, ctx: &BehaviorContext) {
        let previous = self.state;
        self.on_exit(mover);

        if reverses_on_switch(previous, next) {
            mover.request_reverse();
        }

        debug!(ghost = %self.ghost, from = %previous.kind(), to = %next.kind(), "Behavior transition");
        self.state = next;
        self.on_entry(mover, ctx);
    }

    /// Configures the mover for the current state.
    pub fn on_entry(&mut self, mover: &mut GridMover, ctx: &BehaviorContext) {
        mover.speed_multiplier = ctx.speeds.for_kind(self.state.kind());
        mover.house.may_enter = matches!(self.state, BehaviorState::Eaten { .. });
        self.subscribe(mover);
        self.retarget(mover, ctx);
    }

    /// Releases whatever the current state registered on the mover.
    pub fn on_exit(&mut self, mover: &mut GridMover) {
        mover.release_arrival();
        mover.house.may_enter = false;
    }

    /// Tears down the arrival subscription without leaving the state.
    pub fn on_pause(&mut self, mover: &mut GridMover) {
        trace!(ghost = %self.ghost, state = %self.state.kind(), "Behavior paused");
        mover.release_arrival();
    }

    /// Rebuilds what [`Self::on_pause`] tore down.
    pub fn on_resume(&mut self, mover: &mut GridMover, ctx: &BehaviorContext) {
        trace!(ghost = %self.ghost, state = %self.state.kind(), "Behavior resumed");
        self.subscribe(mover);
        self.retarget(mover, ctx);
    }

    fn subscribe(&self, mover: &mut GridMover) {
        match self.state {
            BehaviorState::Scatter { waypoint, .. } => mover.subscribe_arrival(self.waypoint_tile(waypoint)),
            BehaviorState::Eaten { .. } => mover.subscribe_arrival(house::RESPAWN),
            _ => mover.release_arrival(),
        }
    }

    fn waypoint_tile(&self, waypoint: usize) -> TileIndex {
        let path = self.ghost.scatter_path();
        path[waypoint % path.len()]
    }

    /// Recomputes the mover's targeting mode from the current state.
    pub fn retarget(&mut self, mover: &mut GridMover, ctx: &BehaviorContext) {
        mover.mode = match self.state {
            BehaviorState::Idle => TargetingMode::Target(mover.tile),
            BehaviorState::Scatter { waypoint, .. } => TargetingMode::Target(self.waypoint_tile(waypoint)),
            BehaviorState::Chase { .. } => {
                let target = chase_target(self.ghost, mover.tile, ctx.tracker).unwrap_or_else(|| self.ghost.scatter_corner());
                TargetingMode::Target(target)
            }
            BehaviorState::Frightened { .. } | BehaviorState::Roam { .. } => TargetingMode::Random,
            BehaviorState::Eaten { .. } => TargetingMode::Target(house::RESPAWN),
        };
    }

    /// The state a Frightened ghost pops back to once Power mode ends.
    fn pop(&self, resume: ResumeTarget, mover: &GridMover, ctx: &BehaviorContext) -> BehaviorState {
        if ctx.modes.super_active() && !mover.house.locked {
            BehaviorState::Roam { resume }
        } else {
            resume.into_state()
        }
    }

    /// Stores the scheduler's phase as the resume target of a temporary state.
    fn update_resume(&mut self, target: ResumeTarget) {
        match &mut self.state {
            BehaviorState::Frightened { resume } | BehaviorState::Eaten { resume } | BehaviorState::Roam { resume } => {
                *resume = target;
            }
            _ => {}
        }
    }

    /// Reacts to a bus event. Returns whether the state changed.
    pub fn handle_event(&mut self, event: &GameEvent, mover: &mut GridMover, ctx: &BehaviorContext) -> bool {
        use BehaviorState::*;

        let next = match (self.state, *event) {
            (Idle, GameEvent::LevelStarted { .. }) => Some(Scatter { wave: 0, waypoint: 0 }),

            (Scatter { .. }, GameEvent::ChaseModeBegin { wave }) => Some(Chase { wave }),
            (Chase { .. }, GameEvent::ScatterModeBegin { wave }) => Some(Scatter { wave, waypoint: 0 }),
            (Frightened { .. } | Eaten { .. } | Roam { .. }, GameEvent::ScatterModeBegin { wave }) => {
                self.update_resume(ResumeTarget::Scatter { wave });
                None
            }
            (Frightened { .. } | Eaten { .. } | Roam { .. }, GameEvent::ChaseModeBegin { wave }) => {
                self.update_resume(ResumeTarget::Chase { wave });
                None
            }

            (Scatter { wave, .. }, GameEvent::PowerModeBegin) => Some(Frightened {
                resume: ResumeTarget::Scatter { wave },
            }),
            (Chase { wave }, GameEvent::PowerModeBegin) => Some(Frightened {
                resume: ResumeTarget::Chase { wave },
            }),
            (Eaten { resume } | Roam { resume }, GameEvent::PowerModeBegin) => Some(Frightened { resume }),
            (Frightened { .. }, GameEvent::PowerModeBegin) => {
                mover.request_reverse();
                None
            }
            (Frightened { resume }, GameEvent::PowerModeEnd) => Some(self.pop(resume, mover, ctx)),
            (Frightened { resume }, GameEvent::GhostEaten(ghost)) if ghost == self.ghost => Some(Eaten { resume }),

            (Scatter { wave, .. }, GameEvent::SuperModeBegin) if !mover.house.locked => Some(Roam {
                resume: ResumeTarget::Scatter { wave },
            }),
            (Chase { wave }, GameEvent::SuperModeBegin) => Some(Roam {
                resume: ResumeTarget::Chase { wave },
            }),
            (Roam { resume }, GameEvent::SuperModeEnd) => Some(resume.into_state()),

            (Chase { .. }, GameEvent::PlayerMoved { .. }) => {
                self.retarget(mover, ctx);
                None
            }
            (_, GameEvent::HouseReleased(ghost)) if ghost == self.ghost => {
                debug!(ghost = %self.ghost, "Released from the ghost house");
                mover.house.locked = false;
                self.retarget(mover, ctx);
                None
            }
            _ => None,
        };

        match next {
            Some(next) => {
                self.set_state(next, mover, ctx);
                true
            }
            None => false,
        }
    }

    /// Called when the mover reaches its subscribed destination.
    pub fn on_arrival(&mut self, tile: TileIndex, mover: &mut GridMover, ctx: &BehaviorContext) {
        match self.state {
            BehaviorState::Scatter { wave, waypoint } if tile == self.waypoint_tile(waypoint) => {
                let waypoint = (waypoint + 1) % self.ghost.scatter_path().len();
                trace!(ghost = %self.ghost, %tile, waypoint, "Scatter waypoint reached");
                self.state = BehaviorState::Scatter { wave, waypoint };
                self.subscribe(mover);
                self.retarget(mover, ctx);
            }
            BehaviorState::Eaten { resume } if tile == house::RESPAWN => {
                debug!(ghost = %self.ghost, %tile, "Revived in the ghost house");
                self.set_state(resume.into_state(), mover, ctx);
            }
            _ => {}
        }
    }

    /// Runs at every tile center, before the mover picks its next direction.
    pub fn on_tile_center(&mut self, mover: &mut GridMover, ctx: &BehaviorContext) {
        if mover.arrival_reached() {
            self.on_arrival(mover.tile, mover, ctx);
        }
        if matches!(self.state, BehaviorState::Chase { .. }) {
            self.retarget(mover, ctx);
        }
    }
}
