//! Collision and culling predicates
//!
//! Pure functions over entity data. The hit tests are deliberately coarse:
//! the ship is a fixed-radius circle and laser hits are an axis-aligned
//! column test, with different fractions of the meteor's size.

use glam::Vec2;

use super::state::{Laser, Meteor};

/// Has the meteor left the visible area (bottom or either side)?
pub fn meteor_off_screen(meteor: &Meteor, window_width: f32) -> bool {
    let margin = meteor.extents.max;
    meteor.pos.y < -margin || meteor.pos.x < -margin || meteor.pos.x > window_width + margin
}

/// Has the laser left through the top of the screen?
pub fn laser_off_screen(laser: &Laser, window_height: f32) -> bool {
    laser.pos.y > window_height + laser.height
}

/// Does the meteor touch the ship?
///
/// The ship is treated as a circle of `ship_radius` around its center and
/// the meteor as a circle of half its smaller extent.
pub fn meteor_hits_ship(meteor: &Meteor, ship_pos: Vec2, ship_radius: f32) -> bool {
    let distance = meteor.pos.distance(ship_pos);
    distance - meteor.extents.min / 2.0 - ship_radius <= 0.0
}

/// Has the laser struck the meteor?
///
/// The laser must be level with or above the meteor center and within a
/// third of the meteor's smaller extent horizontally.
pub fn laser_hits_meteor(laser: &Laser, meteor: &Meteor) -> bool {
    let half_width = meteor.extents.min / 3.0;
    laser.pos.y >= meteor.pos.y && (laser.pos.x - meteor.pos.x).abs() <= half_width
}
