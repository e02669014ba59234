//! The level-dependent Scatter/Chase wave table.

use strum_macros::{AsRefStr, Display};

use crate::constants::timing::{
    CHASE, EARLY_SCATTER, LAST_EARLY_LEVEL, LATE_SCATTER, LONG_CHASE_LATE, LONG_CHASE_MID, TERMINAL_WAVE,
};

/// How long one phase of a wave lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveDuration {
    Seconds(f32),
    /// Ends on the next scheduler update, however short it is.
    OneFrame,
    Infinite,
}

/// The two halves of a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WavePhase {
    #[default]
    Scatter,
    Chase,
}

/// The Scatter and Chase durations of one wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDurations {
    pub scatter: WaveDuration,
    pub chase: WaveDuration,
}

impl WaveDurations {
    pub fn phase(&self, phase: WavePhase) -> WaveDuration {
        match phase {
            WavePhase::Scatter => self.scatter,
            WavePhase::Chase => self.chase,
        }
    }
}

/// Clamps a wave index to the terminal wave.
pub fn clamp_wave(wave: u8) -> u8 {
    wave.min(TERMINAL_WAVE)
}

/// Returns the durations of a wave on a level. Level zero counts as level one,
/// and waves past the table use the terminal wave.
pub fn wave_durations(level: u32, wave: u8) -> WaveDurations {
    let level = level.max(1);

    match clamp_wave(wave) {
        0..=2 => WaveDurations {
            scatter: WaveDuration::Seconds(if level <= LAST_EARLY_LEVEL {
                EARLY_SCATTER
            } else {
                LATE_SCATTER
            }),
            chase: WaveDuration::Seconds(CHASE),
        },
        3 => WaveDurations {
            scatter: WaveDuration::Seconds(LATE_SCATTER),
            chase: WaveDuration::Seconds(match level {
                1 => CHASE,
                2..=LAST_EARLY_LEVEL => LONG_CHASE_MID,
                _ => LONG_CHASE_LATE,
            }),
        },
        _ => WaveDurations {
            scatter: WaveDuration::OneFrame,
            chase: WaveDuration::Infinite,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_wave_never_ends_in_chase() {
        for level in [1, 5, 40] {
            let terminal = wave_durations(level, TERMINAL_WAVE);
            assert_eq!(terminal.scatter, WaveDuration::OneFrame);
            assert_eq!(terminal.chase, WaveDuration::Infinite);
            assert_eq!(wave_durations(level, u8::MAX), terminal);
        }
    }

    #[test]
    fn test_level_zero_is_level_one() {
        for wave in 0..=TERMINAL_WAVE {
            assert_eq!(wave_durations(0, wave), wave_durations(1, wave));
        }
    }
}
