//! The player's ship
//!
//! Movement is driven entirely by the set of held movement keys. Tilt and
//! engine flames are derived feedback for the renderer and never feed back
//! into the simulation.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Extents;

/// Movement keys the ship reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Left,
    Right,
    Up,
    Down,
}

/// Sideways tilt while strafing (degrees)
pub const TILT_DEGREES: f32 = 5.0;
/// Horizontal squash while strafing
pub const TILT_SCALE_X: f32 = 0.85;

/// Rear flame offset from ship center (x, y) when level
pub const REAR_FLAME_OFFSET: Vec2 = Vec2::new(30.0, -39.0);
/// Rear flame offset while tilted
pub const REAR_FLAME_OFFSET_TILTED: Vec2 = Vec2::new(26.0, -31.0);
/// Front flame offset from ship center
pub const FRONT_FLAME_OFFSET: Vec2 = Vec2::new(12.0, 20.0);

/// Which engine flames are lit (derived from vertical movement)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thrusters {
    /// Main engines, lit while climbing
    pub rear: bool,
    /// Braking jets, lit while descending
    pub front: bool,
}

/// Visual feedback state for the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    /// Rotation in degrees (negative = banking left)
    pub tilt: f32,
    /// Horizontal sprite scale
    pub scale_x: f32,
    pub thrusters: Thrusters,
}

impl ShipPose {
    fn level() -> Self {
        Self {
            tilt: 0.0,
            scale_x: 1.0,
            thrusters: Thrusters::default(),
        }
    }

    /// Is the ship banking?
    pub fn tilted(&self) -> bool {
        self.tilt != 0.0
    }

    /// Offset of the rear flames (mirrored for the left engine)
    pub fn rear_flame_offset(&self) -> Vec2 {
        if self.tilted() {
            REAR_FLAME_OFFSET_TILTED
        } else {
            REAR_FLAME_OFFSET
        }
    }
}

/// Area the ship center may move within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ShipBounds {
    /// Full window width; bottom half a ship above the floor up to one ship
    /// below the top edge
    pub fn for_window(width: f32, height: f32, ship_height: f32) -> Self {
        Self {
            min: Vec2::new(0.0, ship_height / 2.0),
            max: Vec2::new(width, height - ship_height),
        }
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max.x
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.min.y && y <= self.max.y
    }
}

/// The singleton player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub speed: f32,
    pub extents: Extents,
    pub bounds: ShipBounds,
    /// Currently held movement keys
    pub keys: BTreeSet<MoveKey>,
    pub pose: ShipPose,
}

impl Ship {
    pub fn new(pos: Vec2, speed: f32, extents: Extents, bounds: ShipBounds) -> Self {
        Self {
            pos,
            speed,
            extents,
            bounds,
            keys: BTreeSet::new(),
            pose: ShipPose::level(),
        }
    }

    pub fn press(&mut self, key: MoveKey) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: MoveKey) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.keys.contains(&key)
    }

    /// Move according to held keys
    ///
    /// Left wins over right and down wins over up when both are held. A
    /// step is only taken when it lands inside the bounds (inclusive).
    pub fn tick(&mut self, dt: f32) {
        let step = dt * self.speed;
        let (left, right) = (self.pos.x - step, self.pos.x + step);
        let (down, up) = (self.pos.y - step, self.pos.y + step);

        if self.is_held(MoveKey::Left) && self.bounds.contains_x(left) {
            self.pos.x = left;
            self.pose.tilt = -TILT_DEGREES;
            self.pose.scale_x = TILT_SCALE_X;
        } else if self.is_held(MoveKey::Right) && self.bounds.contains_x(right) {
            self.pos.x = right;
            self.pose.tilt = TILT_DEGREES;
            self.pose.scale_x = TILT_SCALE_X;
        } else {
            self.pose.tilt = 0.0;
            self.pose.scale_x = 1.0;
        }

        if self.is_held(MoveKey::Down) && self.bounds.contains_y(down) {
            self.pos.y = down;
            self.pose.thrusters = Thrusters {
                rear: false,
                front: true,
            };
        } else if self.is_held(MoveKey::Up) && self.bounds.contains_y(up) {
            self.pos.y = up;
            self.pose.thrusters = Thrusters {
                rear: true,
                front: false,
            };
        } else {
            self.pose.thrusters = Thrusters::default();
        }
    }
}
