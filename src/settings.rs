//! Game settings
//!
//! Every tunable of a session lives here. Settings load from an optional
//! JSON file; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Inclusive numeric range used for randomized spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    const fn from_pair(pair: (f32, f32)) -> Self {
        Self::new(pair.0, pair.1)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Timers ===
    /// Simulation ticks per second
    pub tick_hz: f32,
    /// Seconds between meteor spawns
    pub spawn_interval: f32,
    /// Spawn interval re-armed after a hit pause
    ///
    /// Defaults to `spawn_interval` so a pause restores the running rates.
    /// Set it apart to change the pace after each hit; the classic arcade
    /// tuning opens at 10/3 s and re-arms at 1/3 s.
    pub resume_spawn_interval: f32,
    /// Freeze duration after the ship is hit (seconds)
    pub hit_pause: f32,

    // === Meteors ===
    pub initial_meteors: u32,
    pub meteor_spawn_margin: f32,
    pub meteor_direction: Range,
    pub meteor_speed: Range,
    pub meteor_spin: Range,

    // === Lasers ===
    pub laser_speed: f32,
    pub laser_spawn_offset: f32,

    // === Ship ===
    pub ship_speed: f32,
    pub ship_start_y: f32,
    pub ship_collision_radius: f32,

    /// RNG seed for the session
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            tick_hz: TICK_HZ,
            spawn_interval: METEOR_SPAWN_INTERVAL,
            resume_spawn_interval: METEOR_SPAWN_INTERVAL,
            hit_pause: HIT_PAUSE,

            initial_meteors: INITIAL_METEORS,
            meteor_spawn_margin: METEOR_SPAWN_MARGIN,
            meteor_direction: Range::from_pair(METEOR_DIRECTION_RANGE),
            meteor_speed: Range::from_pair(METEOR_SPEED_RANGE),
            meteor_spin: Range::from_pair(METEOR_SPIN_RANGE),

            laser_speed: LASER_SPEED,
            laser_spawn_offset: LASER_SPAWN_OFFSET,

            ship_speed: SHIP_SPEED,
            ship_start_y: SHIP_START_Y,
            ship_collision_radius: SHIP_COLLISION_RADIUS,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Seconds between simulation ticks
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_hz
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &'static str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidSetting {
                    name,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        fn ordered(name: &'static str, range: Range) -> Result<()> {
            if range.min.is_finite() && range.max.is_finite() && range.min <= range.max {
                Ok(())
            } else {
                Err(Error::InvalidSetting {
                    name,
                    reason: format!("empty range {}..={}", range.min, range.max),
                })
            }
        }

        positive("window_width", self.window_width)?;
        positive("window_height", self.window_height)?;
        positive("tick_hz", self.tick_hz)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("resume_spawn_interval", self.resume_spawn_interval)?;
        positive("hit_pause", self.hit_pause)?;
        positive("laser_speed", self.laser_speed)?;
        positive("ship_speed", self.ship_speed)?;
        ordered("meteor_direction", self.meteor_direction)?;
        ordered("meteor_speed", self.meteor_speed)?;
        ordered("meteor_spin", self.meteor_spin)?;
        Ok(())
    }
}
