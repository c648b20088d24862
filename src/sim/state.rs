//! Simulated entity types
//!
//! Entities are plain data: a position plus fixed kinematic parameters.
//! Nothing here knows how it is drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading_to_vector;
use crate::sprites::SpriteId;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Tick and spawn timers armed
    Running,
    /// Frozen after the ship was hit, waiting for the resume timer
    Paused,
}

/// Bounding dimensions of an entity's visual footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    /// Larger of width/height (culling margin)
    pub max: f32,
    /// Smaller of width/height (collision size)
    pub min: f32,
}

impl Extents {
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            max: width.max(height),
            min: width.min(height),
        }
    }
}

/// Spawn parameters for a meteor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeteorParams {
    pub pos: Vec2,
    /// Heading in degrees, clockwise from up
    pub direction: f32,
    /// Linear speed (units/second)
    pub speed: f32,
    /// Spin (degrees/second)
    pub rspeed: f32,
    pub sprite: SpriteId,
    pub extents: Extents,
}

/// A falling meteor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    pub direction: f32,
    pub speed: f32,
    pub rspeed: f32,
    /// Accumulated rotation (degrees)
    pub rotation: f32,
    pub sprite: SpriteId,
    pub extents: Extents,
}

impl Meteor {
    pub fn new(id: u32, params: MeteorParams) -> Self {
        Self {
            id,
            pos: params.pos,
            direction: params.direction,
            speed: params.speed,
            rspeed: params.rspeed,
            rotation: 0.0,
            sprite: params.sprite,
            extents: params.extents,
        }
    }

    /// Velocity vector (units/second)
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        heading_to_vector(self.direction) * self.speed
    }

    /// Straight-line motion plus constant spin
    pub fn tick(&mut self, dt: f32) {
        self.pos += self.velocity() * dt;
        self.rotation += dt * self.rspeed;
    }
}

/// A laser bolt travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub sprite: SpriteId,
    pub extents: Extents,
    /// Sprite height, used for leaving the top of the screen
    pub height: f32,
}

impl Laser {
    pub fn tick(&mut self, dt: f32) {
        self.pos.y += dt * self.speed;
    }
}
