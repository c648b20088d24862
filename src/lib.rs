//! Meteor Shower - A 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, hit pause, timers)
//! - `renderer`: Per-frame render synchronization (sprite instances)
//! - `sprites`: Sprite catalog (dimensions that drive entity extents)
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprites;

pub use error::Error;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 1200.0;
    pub const WINDOW_HEIGHT: f32 = 950.0;

    /// Simulation tick rate (30 Hz)
    pub const TICK_HZ: f32 = 30.0;
    /// Seconds between meteor spawns while running (~3.33 Hz)
    pub const METEOR_SPAWN_INTERVAL: f32 = 0.3;
    /// Meteors spawned before the timers start
    pub const INITIAL_METEORS: u32 = 5;
    /// Meteors appear this far above the top edge
    pub const METEOR_SPAWN_MARGIN: f32 = 20.0;

    /// Meteor randomization ranges (inclusive)
    pub const METEOR_DIRECTION_RANGE: (f32, f32) = (150.0, 220.0);
    pub const METEOR_SPEED_RANGE: (f32, f32) = (100.0, 300.0);
    pub const METEOR_SPIN_RANGE: (f32, f32) = (-50.0, 50.0);

    /// Laser defaults
    pub const LASER_SPEED: f32 = 1000.0;
    /// Lasers leave the ship this far above its center
    pub const LASER_SPAWN_OFFSET: f32 = 70.0;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 300.0;
    pub const SHIP_START_Y: f32 = 77.0;
    /// Fixed collision radius, independent of the ship sprite size
    pub const SHIP_COLLISION_RADIUS: f32 = 32.0;

    /// Freeze after a meteor reaches the ship (seconds)
    pub const HIT_PAUSE: f32 = 3.0;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;
}

/// Unit vector for a heading measured clockwise from "up", in degrees
///
/// 0° points up (+y), 90° points right (+x), 180° points down.
#[inline]
pub fn heading_to_vector(degrees: f32) -> Vec2 {
    let theta = std::f32::consts::FRAC_PI_2 - degrees.to_radians();
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_to_vector() {
        let up = heading_to_vector(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y - 1.0).abs() < 1e-6);

        let right = heading_to_vector(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        let down = heading_to_vector(180.0);
        assert!(down.x.abs() < 1e-6 && (down.y + 1.0).abs() < 1e-6);
    }
}
