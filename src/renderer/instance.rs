//! Sprite instance layout for GPU upload

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sprites::SpriteId;

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Layer {
    Background = 0,
    Meteor = 1,
    Laser = 2,
    Flame = 3,
    Ship = 4,
}

/// One textured quad, centered on `position`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    /// Clockwise rotation in degrees
    pub rotation: f32,
    pub scale_x: f32,
    pub sprite: u32,
    pub layer: u32,
}

impl SpriteInstance {
    pub fn new(position: Vec2, sprite: SpriteId, layer: Layer) -> Self {
        Self {
            position: position.to_array(),
            rotation: 0.0,
            scale_x: 1.0,
            sprite: u32::from(sprite.0),
            layer: layer as u32,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn scaled_x(mut self, scale_x: f32) -> Self {
        self.scale_x = scale_x;
        self
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn sprite_id(&self) -> SpriteId {
        SpriteId(self.sprite as u16)
    }
}
