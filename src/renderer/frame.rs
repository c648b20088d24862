//! Frame building
//!
//! Reads the simulation once per frame and produces the flat list of
//! sprites to draw. Whatever the registry holds right now is exactly what
//! gets drawn, so a removed entity can never leave a sprite behind.

use glam::Vec2;

use super::instance::{Layer, SpriteInstance};
use crate::sim::{Game, Ship};
use crate::sprites::SpriteCatalog;

/// Everything to draw this frame, back to front
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub instances: Vec<SpriteInstance>,
}

impl Frame {
    /// Raw bytes for an instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.instances
            .iter()
            .filter(|i| i.layer == layer as u32)
            .count()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Tile centers covering a window, column by column from the origin
pub fn background_tiles(width: f32, height: f32, tile_w: f32, tile_h: f32) -> Vec<Vec2> {
    if tile_w <= 0.0 || tile_h <= 0.0 {
        return Vec::new();
    }

    let mut tiles = Vec::new();
    let mut x = 0.0;
    while x < width {
        let mut y = 0.0;
        while y < height {
            tiles.push(Vec2::new(x + tile_w / 2.0, y + tile_h / 2.0));
            y += tile_h;
        }
        x += tile_w;
    }
    tiles
}

/// Ship sprite plus whichever flames are lit
fn ship_instances(ship: &Ship, catalog: &SpriteCatalog, out: &mut Vec<SpriteInstance>) {
    let pose = ship.pose;

    if pose.thrusters.rear {
        let offset = pose.rear_flame_offset();
        for side in [-1.0, 1.0] {
            let pos = ship.pos + Vec2::new(side * offset.x, offset.y);
            out.push(SpriteInstance::new(pos, catalog.rear_flame, Layer::Flame));
        }
    }
    if pose.thrusters.front {
        let offset = crate::sim::ship::FRONT_FLAME_OFFSET;
        for side in [-1.0, 1.0] {
            let pos = ship.pos + Vec2::new(side * offset.x, offset.y);
            out.push(SpriteInstance::new(pos, catalog.front_flame, Layer::Flame));
        }
    }

    out.push(
        SpriteInstance::new(ship.pos, catalog.ship, Layer::Ship)
            .rotated(pose.tilt)
            .scaled_x(pose.scale_x),
    );
}

/// Build the draw list for the current game state
pub fn build_frame(game: &Game) -> Frame {
    let catalog = &game.catalog;
    let bg = catalog.get(catalog.background);
    let tiles = background_tiles(
        game.settings.window_width,
        game.settings.window_height,
        bg.width,
        bg.height,
    );

    let mut instances = Vec::with_capacity(
        tiles.len() + game.world.meteors.len() + game.world.lasers.len() + 5,
    );

    instances.extend(
        tiles
            .into_iter()
            .map(|pos| SpriteInstance::new(pos, catalog.background, Layer::Background)),
    );
    instances.extend(game.world.meteors.iter().map(|m| {
        SpriteInstance::new(m.pos, m.sprite, Layer::Meteor).rotated(m.rotation)
    }));
    instances.extend(
        game.world
            .lasers
            .iter()
            .map(|l| SpriteInstance::new(l.pos, l.sprite, Layer::Laser)),
    );
    ship_instances(&game.ship, catalog, &mut instances);

    Frame { instances }
}
