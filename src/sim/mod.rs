//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timer-driven ticks only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod game;
pub mod input;
pub mod ship;
pub mod spawn;
pub mod state;
pub mod world;

pub use clock::{Clock, Fired, TimerName};
pub use collision::{laser_hits_meteor, laser_off_screen, meteor_hits_ship, meteor_off_screen};
pub use game::Game;
pub use input::{Autopilot, InputEvent, Key};
pub use ship::{MoveKey, Ship, ShipBounds, ShipPose, Thrusters};
pub use spawn::{MeteorOverrides, MeteorSpawner};
pub use state::{Extents, GamePhase, Laser, Meteor, MeteorParams};
pub use world::{GameEvent, World, WorldBounds};
