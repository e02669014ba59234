//! The session-wide wave scheduler.
//!
//! Drives the Scatter/Chase alternation, the Power and Super mode timers and the
//! per-ghost house arrests. Every operation returns the events it produced, in the
//! order they happened; the caller publishes them on the event bus.

use bevy_ecs::resource::Resource;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::constants::frightened_seconds;
use crate::events::GameEvent;
use crate::ghost::state::ResumeTarget;
use crate::ghost::Ghost;

pub mod timer;
pub mod wave;

use timer::{HouseArrest, ModeTimer};
use wave::{clamp_wave, wave_durations, WaveDuration, WavePhase};

/// Events produced by one scheduler operation.
pub type SchedulerEvents = SmallVec<[GameEvent; 4]>;

/// A read-only view of the global modes, handed to the behavior state machines.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModeSnapshot {
    pub level: u32,
    pub wave: u8,
    pub phase: WavePhase,
    pub wave_paused: bool,
    pub power_remaining: Option<f32>,
    pub super_remaining: Option<f32>,
}

impl ModeSnapshot {
    pub fn power_active(&self) -> bool {
        self.power_remaining.is_some()
    }

    pub fn super_active(&self) -> bool {
        self.super_remaining.is_some()
    }

    /// The wave phase currently in force.
    pub fn resume_target(&self) -> ResumeTarget {
        match self.phase {
            WavePhase::Scatter => ResumeTarget::Scatter { wave: self.wave },
            WavePhase::Chase => ResumeTarget::Chase { wave: self.wave },
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct WaveScheduler {
    level: u32,
    running: bool,
    wave: u8,
    phase: WavePhase,
    /// Time left in the current phase.
    clock: WaveDuration,
    wave_paused: bool,
    power: ModeTimer,
    super_mode: ModeTimer,
    arrests: [Option<HouseArrest>; 4],
    house_base: [f32; 4],
    power_override: Option<f32>,
}

impl WaveScheduler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            level: 1,
            running: false,
            wave: 0,
            phase: WavePhase::Scatter,
            clock: WaveDuration::Infinite,
            wave_paused: false,
            power: ModeTimer::default(),
            super_mode: ModeTimer::default(),
            arrests: [None; 4],
            house_base: config.house_base,
            power_override: config.power_seconds,
        }
    }

    /// Resets every timer for a level (re)start and begins wave 0's Scatter phase.
    ///
    /// Ghosts in `roster` that start locked are put under house arrest; those whose
    /// arrest is already over are released right away.
    pub fn start_level(&mut self, level: u32, roster: &[Ghost]) -> SchedulerEvents {
        let level = level.max(1);
        self.level = level;
        self.running = true;
        self.wave = 0;
        self.phase = WavePhase::Scatter;
        self.clock = wave_durations(level, 0).phase(WavePhase::Scatter);
        self.wave_paused = false;
        self.power = ModeTimer::default();
        self.super_mode = ModeTimer::default();
        self.arrests = [None; 4];

        let mut events = SchedulerEvents::new();
        events.push(GameEvent::LevelStarted { level });
        events.push(GameEvent::ScatterModeBegin { wave: 0 });

        for ghost in roster.iter().copied().filter(|ghost| ghost.starts_locked()) {
            let arrest = HouseArrest::new(ghost, self.house_base[ghost.as_index()], level);
            if arrest.is_immediate() {
                events.push(GameEvent::HouseReleased(ghost));
            } else {
                self.arrests[ghost.as_index()] = Some(arrest);
            }
        }

        info!(level, "Level started");
        events
    }

    /// The Power mode duration for the current level.
    pub fn power_seconds(&self) -> f32 {
        self.power_override.unwrap_or_else(|| frightened_seconds(self.level))
    }

    /// Begins Power mode, or extends it by a full duration if it is already running.
    ///
    /// A running Super mode is extended by the same amount so it outlasts Power mode.
    pub fn begin_power(&mut self) -> SchedulerEvents {
        let seconds = self.power_seconds();
        if self.super_mode.is_active() {
            self.super_mode.extend(seconds);
        }

        let started = self.power.start_or_extend(seconds);
        self.wave_paused = true;
        debug!(seconds, started, remaining = ?self.power.remaining(), "Power mode triggered");

        let mut events = SchedulerEvents::new();
        events.push(GameEvent::PowerModeBegin);
        events
    }

    /// Begins Super mode, or extends it if it is already running.
    pub fn begin_super(&mut self, seconds: f32) -> SchedulerEvents {
        let started = self.super_mode.start_or_extend(seconds);
        debug!(seconds, started, remaining = ?self.super_mode.remaining(), "Super mode triggered");

        let mut events = SchedulerEvents::new();
        events.push(GameEvent::SuperModeBegin);
        events
    }

    /// Ends Power mode immediately.
    pub fn expire_power(&mut self) -> SchedulerEvents {
        let mut events = SchedulerEvents::new();
        if self.power.expire() {
            self.on_power_end(&mut events);
        }
        events
    }

    /// Ends Super mode immediately.
    pub fn expire_super(&mut self) -> SchedulerEvents {
        let mut events = SchedulerEvents::new();
        if self.super_mode.expire() {
            self.on_super_end(&mut events);
        }
        events
    }

    fn on_power_end(&mut self, events: &mut SchedulerEvents) {
        debug!("Power mode ended");
        events.push(GameEvent::PowerModeEnd);
        if !self.super_mode.is_active() {
            self.wave_paused = false;
        }
    }

    fn on_super_end(&mut self, events: &mut SchedulerEvents) {
        debug!("Super mode ended");
        events.push(GameEvent::SuperModeEnd);
        if !self.power.is_active() {
            self.wave_paused = false;
        }
    }

    /// Advances every timer by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> SchedulerEvents {
        let mut events = SchedulerEvents::new();
        if !self.running {
            return events;
        }

        // A wave paused at any point of this update keeps its remaining time
        let was_paused = self.wave_paused;
        if self.power.tick(dt) {
            self.on_power_end(&mut events);
        }
        if self.super_mode.tick(dt) {
            self.on_super_end(&mut events);
        }

        if !was_paused && !self.wave_paused {
            let expired = match &mut self.clock {
                WaveDuration::Seconds(remaining) => {
                    *remaining -= dt.max(0.0);
                    *remaining <= 0.0
                }
                WaveDuration::OneFrame => true,
                WaveDuration::Infinite => false,
            };
            if expired {
                self.advance_phase(&mut events);
            }
        }

        for slot in self.arrests.iter_mut() {
            if let Some(arrest) = slot {
                if arrest.tick(dt) {
                    trace!(ghost = %arrest.ghost(), "House arrest over");
                    events.push(GameEvent::HouseReleased(arrest.ghost()));
                    *slot = None;
                }
            }
        }

        events
    }

    fn advance_phase(&mut self, events: &mut SchedulerEvents) {
        match self.phase {
            WavePhase::Scatter => {
                events.push(GameEvent::ScatterModeEnd { wave: self.wave });
                self.phase = WavePhase::Chase;
                self.clock = wave_durations(self.level, self.wave).phase(self.phase);
                events.push(GameEvent::ChaseModeBegin { wave: self.wave });
            }
            WavePhase::Chase => {
                events.push(GameEvent::ChaseModeEnd { wave: self.wave });
                self.wave = clamp_wave(self.wave.saturating_add(1));
                self.phase = WavePhase::Scatter;
                self.clock = wave_durations(self.level, self.wave).phase(self.phase);
                events.push(GameEvent::ScatterModeBegin { wave: self.wave });
            }
        }
        info!(wave = self.wave, phase = %self.phase, remaining = ?self.clock, "Wave phase changed");
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn wave(&self) -> u8 {
        self.wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Time left in the current wave phase.
    pub fn wave_remaining(&self) -> WaveDuration {
        self.clock
    }

    pub fn is_wave_paused(&self) -> bool {
        self.wave_paused
    }

    pub fn power_remaining(&self) -> Option<f32> {
        self.power.remaining()
    }

    pub fn super_remaining(&self) -> Option<f32> {
        self.super_mode.remaining()
    }

    /// Time left before a ghost leaves the house, or `None` if it is not held.
    pub fn house_arrest_remaining(&self, ghost: Ghost) -> Option<f32> {
        self.arrests[ghost.as_index()].map(|arrest| arrest.remaining())
    }

    pub fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            level: self.level,
            wave: self.wave,
            phase: self.phase,
            wave_paused: self.wave_paused,
            power_remaining: self.power.remaining(),
            super_remaining: self.super_mode.remaining(),
        }
    }
}
