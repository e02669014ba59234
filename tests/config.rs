use figment::Figment;
use ghost_engine::config::{EngineConfig, SpeedMultipliers, DEFAULT_SEED};
use ghost_engine::error::{ConfigError, GameError};
use ghost_engine::ghost::Ghost;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_empty_figment_uses_defaults() {
    let config = EngineConfig::from_figment(Figment::new()).unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.roster, Ghost::ALL.to_vec());
    assert_eq!(config.speeds, SpeedMultipliers::default());
}

#[test]
fn test_overrides_are_applied() {
    let figment = Figment::new()
        .merge(("speed", 10.0))
        .merge(("eaten_multiplier", 3.0))
        .merge(("inky_house_seconds", 2.5))
        .merge(("power_seconds", 9.0))
        .merge(("seed", 99))
        .merge(("ghosts", "blinky, clyde"));
    let config = EngineConfig::from_figment(figment).unwrap();

    assert_eq!(config.ghost_speed, 10.0);
    assert_eq!(config.speeds.eaten, 3.0);
    assert_eq!(config.house_base[Ghost::Inky.as_index()], 2.5);
    assert_eq!(config.power_seconds, Some(9.0));
    assert_eq!(config.seed, 99);
    assert_eq!(config.roster, vec![Ghost::Blinky, Ghost::Clyde]);
}

#[test]
fn test_negative_durations_are_clamped() {
    let figment = Figment::new()
        .merge(("pinky_house_seconds", -4.0))
        .merge(("power_seconds", -1.0))
        .merge(("super_seconds", -2.0));
    let config = EngineConfig::from_figment(figment).unwrap();

    assert_eq!(config.house_base[Ghost::Pinky.as_index()], 0.0);
    assert_eq!(config.power_seconds, Some(0.0));
    assert_eq!(config.super_seconds, 0.0);
}

#[test]
fn test_invalid_speeds_are_rejected() {
    let result = EngineConfig::from_figment(Figment::new().merge(("speed", 0.0)));
    assert_that(&matches!(
        result,
        Err(GameError::Config(ConfigError::InvalidValue { .. }))
    ))
    .is_true();

    let result = EngineConfig::from_figment(Figment::new().merge(("chase_multiplier", -1.0)));
    assert_that(&matches!(
        result,
        Err(GameError::Config(ConfigError::InvalidValue { .. }))
    ))
    .is_true();
}

#[test]
fn test_invalid_rosters_are_rejected() {
    let result = EngineConfig::from_figment(Figment::new().merge(("ghosts", "inky,pinky")));
    assert_that(&matches!(result, Err(GameError::Config(_)))).is_true();

    let result = EngineConfig::from_figment(Figment::new().merge(("ghosts", "blinky,sue")));
    assert_that(&matches!(result, Err(GameError::Config(_)))).is_true();
}
