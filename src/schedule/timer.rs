//! Countdown timers driven by the wave scheduler.

use crate::ghost::Ghost;

/// An extendable, force-expirable countdown (Power and Super mode).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModeTimer {
    remaining: f32,
    active: bool,
}

impl ModeTimer {
    /// Starts the timer, or adds to the remaining time if it is already running.
    ///
    /// Returns `true` if the timer was idle and has just started. Negative
    /// durations are clamped to zero, expiring on the next tick.
    pub fn start_or_extend(&mut self, seconds: f32) -> bool {
        let seconds = seconds.max(0.0);
        if self.active {
            self.remaining += seconds;
            false
        } else {
            self.remaining = seconds;
            self.active = true;
            true
        }
    }

    /// Adds time to a running timer. Does nothing when idle.
    pub fn extend(&mut self, seconds: f32) {
        if self.active {
            self.remaining += seconds.max(0.0);
        }
    }

    /// Counts down. Returns `true` on the tick the timer expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.clear();
            return true;
        }
        false
    }

    /// Ends the timer immediately. Returns `true` if it was running.
    pub fn expire(&mut self) -> bool {
        let was_active = self.active;
        self.clear();
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The time left, or `None` when idle.
    pub fn remaining(&self) -> Option<f32> {
        self.active.then_some(self.remaining)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Seconds a ghost with house arrest base `base` is held at `level`.
pub fn house_arrest_seconds(base: f32, level: u32) -> f32 {
    (base - level as f32).max(0.0)
}

/// A one-shot timer that releases a ghost from the house.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseArrest {
    ghost: Ghost,
    remaining: f32,
}

impl HouseArrest {
    pub fn new(ghost: Ghost, base: f32, level: u32) -> Self {
        Self {
            ghost,
            remaining: house_arrest_seconds(base, level),
        }
    }

    pub fn ghost(&self) -> Ghost {
        self.ghost
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether the ghost is free without waiting at all.
    pub fn is_immediate(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Counts down. Returns `true` once the arrest is over.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining <= 0.0
    }
}
