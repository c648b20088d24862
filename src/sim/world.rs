//! Live entity registry
//!
//! Owns every meteor and laser, advances them each tick and resolves the
//! two collision relations. Removal is mark-and-compact: a pass only sets
//! flags, then the collections are compacted in one `retain`, so no entity
//! is ever ticked or tested after it has been removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{laser_hits_meteor, laser_off_screen, meteor_hits_ship, meteor_off_screen};
use super::state::{Laser, Meteor, MeteorParams};

/// Something observers (renderer, audio, logs) may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MeteorSpawned { id: u32 },
    /// Meteor drifted off screen
    MeteorCulled { id: u32 },
    /// Meteor and laser destroyed each other
    MeteorDestroyed { meteor: u32, laser: u32 },
    LaserFired { id: u32 },
    /// Laser left through the top of the screen
    LaserExpired { id: u32 },
    /// Meteor reached the ship; the game freezes
    ShipHit { meteor: u32 },
    /// Pause over, colliding meteor removed
    Resumed { cleared: Option<u32> },
}

/// Fixed geometry the registry needs each tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    pub ship_radius: f32,
}

/// The meteor/laser registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub bounds: WorldBounds,
    /// Live meteors in spawn order
    pub meteors: Vec<Meteor>,
    /// Live lasers in spawn order
    pub lasers: Vec<Laser>,
    /// Meteor frozen on the ship during a hit pause
    pub hit_meteor: Option<u32>,
    /// Pending events for observers
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            bounds,
            meteors: Vec::new(),
            lasers: Vec::new(),
            hit_meteor: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_meteor(&mut self, params: MeteorParams) -> u32 {
        let id = self.next_entity_id();
        self.meteors.push(Meteor::new(id, params));
        self.events.push(GameEvent::MeteorSpawned { id });
        log::debug!("Meteor {} spawned at ({:.0}, {:.0})", id, params.pos.x, params.pos.y);
        id
    }

    /// Add a laser; its id is assigned here
    pub fn add_laser(&mut self, mut laser: Laser) -> u32 {
        let id = self.next_entity_id();
        laser.id = id;
        self.lasers.push(laser);
        self.events.push(GameEvent::LaserFired { id });
        id
    }

    pub fn meteor(&self, id: u32) -> Option<&Meteor> {
        self.meteors.iter().find(|m| m.id == id)
    }

    pub fn laser(&self, id: u32) -> Option<&Laser> {
        self.lasers.iter().find(|l| l.id == id)
    }

    /// Advance every entity by `dt` and resolve collisions
    ///
    /// Returns the id of the first meteor (in spawn order) touching the
    /// ship, if any. Lasers are resolved before the ship check, each laser
    /// in spawn order taking the earliest-spawned meteor it overlaps that
    /// has not already been destroyed this tick.
    pub fn tick(&mut self, dt: f32, ship_pos: Vec2) -> Option<u32> {
        let bounds = self.bounds;

        for meteor in &mut self.meteors {
            meteor.tick(dt);
        }
        let mut meteor_dead: Vec<bool> = self
            .meteors
            .iter()
            .map(|m| meteor_off_screen(m, bounds.width))
            .collect();
        for (meteor, _) in self.meteors.iter().zip(&meteor_dead).filter(|(_, dead)| **dead) {
            self.events.push(GameEvent::MeteorCulled { id: meteor.id });
        }

        for laser in &mut self.lasers {
            laser.tick(dt);
        }
        let mut laser_dead: Vec<bool> = self
            .lasers
            .iter()
            .map(|l| laser_off_screen(l, bounds.height))
            .collect();
        for (laser, _) in self.lasers.iter().zip(&laser_dead).filter(|(_, dead)| **dead) {
            self.events.push(GameEvent::LaserExpired { id: laser.id });
        }

        for (li, laser) in self.lasers.iter().enumerate() {
            if laser_dead[li] {
                continue;
            }
            let target = self
                .meteors
                .iter()
                .enumerate()
                .find(|&(mi, meteor)| !meteor_dead[mi] && laser_hits_meteor(laser, meteor));
            if let Some((mi, meteor)) = target {
                meteor_dead[mi] = true;
                laser_dead[li] = true;
                self.events.push(GameEvent::MeteorDestroyed {
                    meteor: meteor.id,
                    laser: laser.id,
                });
                log::debug!("Laser {} destroyed meteor {}", laser.id, meteor.id);
            }
        }

        compact(&mut self.meteors, &meteor_dead);
        compact(&mut self.lasers, &laser_dead);

        self.meteors
            .iter()
            .find(|m| meteor_hits_ship(m, ship_pos, bounds.ship_radius))
            .map(|m| m.id)
    }

    /// Record the meteor that hit the ship; it stays frozen in place
    pub fn hit(&mut self, meteor: u32) {
        self.hit_meteor = Some(meteor);
        self.events.push(GameEvent::ShipHit { meteor });
    }

    /// Remove the meteor that caused the last hit
    ///
    /// Returns its id if it was still present.
    pub fn renew(&mut self) -> Option<u32> {
        let id = self.hit_meteor.take()?;
        let before = self.meteors.len();
        self.meteors.retain(|m| m.id != id);
        let cleared = (self.meteors.len() < before).then_some(id);
        self.events.push(GameEvent::Resumed { cleared });
        cleared
    }
}

/// Drop every element whose flag is set, preserving order
fn compact<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !dead[index];
        index += 1;
        keep
    });
}
