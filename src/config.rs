use std::collections::HashSet;
use std::str::FromStr;

use bevy_ecs::resource::Resource;
use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::{mechanics, timing};
use crate::error::{ConfigError, GameResult};
use crate::ghost::state::BehaviorKind;
use crate::ghost::Ghost;

/// Seed used for random ghost movement unless one is configured.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Per-state multipliers applied to the ghost base speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedMultipliers {
    pub scatter: f32,
    pub chase: f32,
    pub frightened: f32,
    pub eaten: f32,
    pub roam: f32,
}

impl Default for SpeedMultipliers {
    fn default() -> Self {
        Self {
            scatter: mechanics::SCATTER_MULTIPLIER,
            chase: mechanics::CHASE_MULTIPLIER,
            frightened: mechanics::FRIGHTENED_MULTIPLIER,
            eaten: mechanics::EATEN_MULTIPLIER,
            roam: mechanics::ROAM_MULTIPLIER,
        }
    }
}

impl SpeedMultipliers {
    /// Idle ghosts do not move.
    pub fn for_kind(&self, kind: BehaviorKind) -> f32 {
        match kind {
            BehaviorKind::Idle => 0.0,
            BehaviorKind::Scatter => self.scatter,
            BehaviorKind::Chase => self.chase,
            BehaviorKind::Frightened => self.frightened,
            BehaviorKind::Eaten => self.eaten,
            BehaviorKind::Roam => self.roam,
        }
    }
}

/// Engine tunables
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct EngineConfig {
    /// Ghost base speed, in tiles per second
    pub ghost_speed: f32,
    pub speeds: SpeedMultipliers,
    /// House arrest base durations in seconds, indexed by [`Ghost::as_index`]
    pub house_base: [f32; 4],
    /// Overrides the per-level Power mode duration
    pub power_seconds: Option<f32>,
    /// Super mode duration used when a collaborator does not give one
    pub super_seconds: f32,
    /// Seed for random movement choices
    pub seed: u64,
    /// The ghosts spawned in the session
    pub roster: Vec<Ghost>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ghost_speed: mechanics::GHOST_SPEED,
            speeds: SpeedMultipliers::default(),
            house_base: [
                0.0,
                timing::PINKY_HOUSE_BASE,
                timing::INKY_HOUSE_BASE,
                timing::CLYDE_HOUSE_BASE,
            ],
            power_seconds: None,
            super_seconds: timing::SUPER_DEFAULT,
            seed: DEFAULT_SEED,
            roster: Ghost::ALL.to_vec(),
        }
    }
}

/// Raw configuration loaded directly from `GHOST_*` environment variables.
/// This is an intermediate representation that gets validated and converted to [`EngineConfig`].
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_ghost_speed")]
    speed: f32,

    #[serde(default = "default_scatter_multiplier")]
    scatter_multiplier: f32,
    #[serde(default = "default_chase_multiplier")]
    chase_multiplier: f32,
    #[serde(default = "default_frightened_multiplier")]
    frightened_multiplier: f32,
    #[serde(default = "default_eaten_multiplier")]
    eaten_multiplier: f32,
    #[serde(default = "default_roam_multiplier")]
    roam_multiplier: f32,

    #[serde(default = "default_pinky_house")]
    pinky_house_seconds: f32,
    #[serde(default = "default_inky_house")]
    inky_house_seconds: f32,
    #[serde(default = "default_clyde_house")]
    clyde_house_seconds: f32,

    power_seconds: Option<f32>,
    #[serde(default = "default_super_seconds")]
    super_seconds: f32,

    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default = "default_ghosts")]
    ghosts: String,
}

impl TryFrom<RawConfig> for EngineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        if !raw.speed.is_finite() || raw.speed <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "speed",
                reason: format!("must be a positive number, got {}", raw.speed),
            });
        }

        let speeds = SpeedMultipliers {
            scatter: validate_multiplier("scatter_multiplier", raw.scatter_multiplier)?,
            chase: validate_multiplier("chase_multiplier", raw.chase_multiplier)?,
            frightened: validate_multiplier("frightened_multiplier", raw.frightened_multiplier)?,
            eaten: validate_multiplier("eaten_multiplier", raw.eaten_multiplier)?,
            roam: validate_multiplier("roam_multiplier", raw.roam_multiplier)?,
        };

        Ok(EngineConfig {
            ghost_speed: raw.speed,
            speeds,
            // Negative durations mean "no wait" rather than an error
            house_base: [
                0.0,
                raw.pinky_house_seconds.max(0.0),
                raw.inky_house_seconds.max(0.0),
                raw.clyde_house_seconds.max(0.0),
            ],
            power_seconds: raw.power_seconds.map(|seconds| seconds.max(0.0)),
            super_seconds: raw.super_seconds.max(0.0),
            seed: raw.seed,
            roster: parse_roster(&raw.ghosts)?,
        })
    }
}

fn validate_multiplier(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be a non-negative number, got {value}"),
        })
    }
}

/// Parses a comma-separated list of ghost names.
///
/// Inky's targeting reflects Blinky's position, so a roster with Inky must also have Blinky.
pub fn parse_roster(list: &str) -> Result<Vec<Ghost>, ConfigError> {
    let mut roster = Vec::new();
    let mut seen = HashSet::new();

    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let ghost = Ghost::from_str(name).map_err(|_| ConfigError::UnknownGhost(name.to_string()))?;
        if !seen.insert(ghost) {
            return Err(ConfigError::DuplicateGhost(name.to_string()));
        }
        roster.push(ghost);
    }

    validate_roster(&roster)?;
    Ok(roster)
}

/// Checks a roster for duplicates and for Inky without Blinky.
pub fn validate_roster(roster: &[Ghost]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for ghost in roster {
        if !seen.insert(*ghost) {
            return Err(ConfigError::DuplicateGhost(ghost.to_string()));
        }
    }
    if seen.contains(&Ghost::Inky) && !seen.contains(&Ghost::Blinky) {
        return Err(ConfigError::InkyWithoutBlinky);
    }
    Ok(())
}

impl EngineConfig {
    /// Loads the configuration from `GHOST_*` environment variables, falling back to defaults.
    pub fn from_env() -> GameResult<Self> {
        Self::from_figment(Figment::new().merge(Env::prefixed("GHOST_")))
    }

    /// Extracts and validates the configuration from any figment.
    pub fn from_figment(figment: Figment) -> GameResult<Self> {
        let raw: RawConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "environment",
            reason: e.to_string(),
        })?;
        Ok(Self::try_from(raw)?)
    }
}

fn default_ghost_speed() -> f32 {
    mechanics::GHOST_SPEED
}

fn default_scatter_multiplier() -> f32 {
    mechanics::SCATTER_MULTIPLIER
}

fn default_chase_multiplier() -> f32 {
    mechanics::CHASE_MULTIPLIER
}

fn default_frightened_multiplier() -> f32 {
    mechanics::FRIGHTENED_MULTIPLIER
}

fn default_eaten_multiplier() -> f32 {
    mechanics::EATEN_MULTIPLIER
}

fn default_roam_multiplier() -> f32 {
    mechanics::ROAM_MULTIPLIER
}

fn default_pinky_house() -> f32 {
    timing::PINKY_HOUSE_BASE
}

fn default_inky_house() -> f32 {
    timing::INKY_HOUSE_BASE
}

fn default_clyde_house() -> f32 {
    timing::CLYDE_HOUSE_BASE
}

fn default_super_seconds() -> f32 {
    timing::SUPER_DEFAULT
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_ghosts() -> String {
    "blinky,pinky,inky,clyde".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster() {
        assert_eq!(parse_roster(" Blinky, inky ").unwrap(), vec![Ghost::Blinky, Ghost::Inky]);
        assert_eq!(parse_roster("").unwrap(), Vec::<Ghost>::new());
    }

    #[test]
    fn test_parse_roster_rejects_bad_lists() {
        assert_eq!(parse_roster("blinky,sue"), Err(ConfigError::UnknownGhost("sue".to_string())));
        assert_eq!(parse_roster("pinky,PINKY"), Err(ConfigError::DuplicateGhost("PINKY".to_string())));
        assert_eq!(parse_roster("inky,clyde"), Err(ConfigError::InkyWithoutBlinky));
    }

    #[test]
    fn test_idle_does_not_move() {
        assert_eq!(SpeedMultipliers::default().for_kind(BehaviorKind::Idle), 0.0);
    }
}
