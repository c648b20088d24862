//! Input events and the demo autopilot

use serde::{Deserialize, Serialize};

use super::ship::{MoveKey, Ship};
use super::world::World;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Spawns a laser on press instead of being held
    Fire,
}

impl Key {
    /// Movement key this maps to, if any
    pub fn as_move(self) -> Option<MoveKey> {
        match self {
            Key::Left => Some(MoveKey::Left),
            Key::Right => Some(MoveKey::Right),
            Key::Up => Some(MoveKey::Up),
            Key::Down => Some(MoveKey::Down),
            Key::Fire => None,
        }
    }
}

/// A raw key transition from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Seconds between autopilot shots
const AUTOPILOT_FIRE_COOLDOWN: f64 = 0.25;
/// Extra horizontal clearance the autopilot keeps from falling meteors
const AUTOPILOT_CLEARANCE: f32 = 60.0;
/// How far above the ship the autopilot looks for threats
const AUTOPILOT_LOOKAHEAD: f32 = 450.0;

/// Demo mode: plays the game by emitting input events
///
/// Dodges sideways away from the nearest meteor falling toward the ship
/// and fires whenever a meteor is lined up overhead.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    held: Option<MoveKey>,
    last_shot: Option<f64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's input transitions
    pub fn plan(&mut self, ship: &Ship, world: &World, now: f64) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Closest meteor above the ship that is roughly in its column
        let threat = world
            .meteors
            .iter()
            .filter(|m| {
                let dy = m.pos.y - ship.pos.y;
                let reach = m.extents.min / 2.0 + world.bounds.ship_radius + AUTOPILOT_CLEARANCE;
                dy > -m.extents.min && dy < AUTOPILOT_LOOKAHEAD && (m.pos.x - ship.pos.x).abs() < reach
            })
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            });

        let wanted = threat.map(|m| {
            let dodge_left = m.pos.x >= ship.pos.x;
            // Near a wall, dodge the other way
            if dodge_left && ship.pos.x <= ship.bounds.min.x + AUTOPILOT_CLEARANCE {
                MoveKey::Right
            } else if !dodge_left && ship.pos.x >= ship.bounds.max.x - AUTOPILOT_CLEARANCE {
                MoveKey::Left
            } else if dodge_left {
                MoveKey::Left
            } else {
                MoveKey::Right
            }
        });

        if wanted != self.held {
            if let Some(key) = self.held {
                events.push(InputEvent::KeyUp(move_to_key(key)));
            }
            if let Some(key) = wanted {
                events.push(InputEvent::KeyDown(move_to_key(key)));
            }
            self.held = wanted;
        }

        let lined_up = world
            .meteors
            .iter()
            .any(|m| m.pos.y > ship.pos.y && (m.pos.x - ship.pos.x).abs() <= m.extents.min / 3.0);
        let ready = self
            .last_shot
            .is_none_or(|t| now - t >= AUTOPILOT_FIRE_COOLDOWN);
        if lined_up && ready {
            events.push(InputEvent::KeyDown(Key::Fire));
            events.push(InputEvent::KeyUp(Key::Fire));
            self.last_shot = Some(now);
        }

        events
    }
}

fn move_to_key(key: MoveKey) -> Key {
    match key {
        MoveKey::Left => Key::Left,
        MoveKey::Right => Key::Right,
        MoveKey::Up => Key::Up,
        MoveKey::Down => Key::Down,
    }
}
