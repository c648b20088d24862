//! Game context and timer-driven loop
//!
//! `Game` owns everything a session needs: settings, sprite catalog, the
//! entity registry, the ship, the RNG and the timer table. All mutation
//! happens inside timer callbacks or input handlers, one at a time.
//!
//! Hit sequence: a meteor reaching the ship cancels the tick and spawn
//! timers and arms a one-shot resume timer. While paused nothing moves and
//! nothing spawns. On resume the colliding meteor is removed and both
//! timers are re-armed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{Clock, Fired, TimerName};
use super::input::{InputEvent, Key};
use super::ship::{Ship, ShipBounds};
use super::spawn::{MeteorOverrides, MeteorSpawner};
use super::state::{GamePhase, Laser};
use super::world::{GameEvent, World, WorldBounds};
use crate::error::Result;
use crate::settings::Settings;
use crate::sprites::SpriteCatalog;

/// A running game session
#[derive(Debug, Clone)]
pub struct Game {
    pub settings: Settings,
    pub catalog: SpriteCatalog,
    pub world: World,
    pub ship: Ship,
    pub phase: GamePhase,
    /// Simulation ticks processed
    pub time_ticks: u64,
    clock: Clock,
    rng: Pcg32,
    spawner: MeteorSpawner,
}

impl Game {
    /// Build a session, spawn the opening meteors and arm the timers
    pub fn new(settings: Settings, catalog: SpriteCatalog) -> Result<Self> {
        settings.validate()?;
        catalog.validate()?;

        let ship_extents = catalog.extents(catalog.ship);
        let ship_height = catalog.get(catalog.ship).height;
        let ship = Ship::new(
            Vec2::new(settings.window_width / 2.0, settings.ship_start_y),
            settings.ship_speed,
            ship_extents,
            ShipBounds::for_window(settings.window_width, settings.window_height, ship_height),
        );
        let world = World::new(WorldBounds {
            width: settings.window_width,
            height: settings.window_height,
            ship_radius: settings.ship_collision_radius,
        });

        let mut game = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            spawner: MeteorSpawner::new(&settings),
            clock: Clock::new(),
            phase: GamePhase::Running,
            time_ticks: 0,
            settings,
            catalog,
            world,
            ship,
        };

        for _ in 0..game.settings.initial_meteors {
            game.spawn_meteor();
        }
        game.arm_timers(game.settings.spawn_interval);

        log::info!(
            "Game initialized with seed {} ({} meteors)",
            game.settings.seed,
            game.world.meteors.len()
        );
        Ok(game)
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Seconds since the session started
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Advance wall-clock time, running every timer that comes due
    pub fn advance(&mut self, dt: f32) {
        let until = self.clock.now() + f64::from(dt.max(0.0));
        while let Some(fired) = self.clock.next_due(until) {
            self.dispatch(fired);
        }
        self.clock.settle(until);
    }

    fn dispatch(&mut self, fired: Fired) {
        match fired.name {
            TimerName::Tick => self.on_tick(fired.dt),
            TimerName::Spawn => {
                self.spawn_meteor();
            }
            TimerName::Resume => self.on_resume(),
        }
    }

    /// One simulation step: registry first, then the ship
    fn on_tick(&mut self, dt: f32) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.time_ticks += 1;
        log::trace!("tick {} dt={:.4}", self.time_ticks, dt);

        if let Some(meteor) = self.world.tick(dt, self.ship.pos) {
            self.on_hit(meteor);
            return;
        }
        self.ship.tick(dt);
    }

    fn on_hit(&mut self, meteor: u32) {
        self.clock.unschedule(TimerName::Tick);
        self.clock.unschedule(TimerName::Spawn);
        self.clock.schedule_once(TimerName::Resume, self.settings.hit_pause);
        self.world.hit(meteor);
        self.phase = GamePhase::Paused;
        log::info!(
            "Ship hit by meteor {} - pausing for {:.1}s",
            meteor,
            self.settings.hit_pause
        );
    }

    fn on_resume(&mut self) {
        let cleared = self.world.renew();
        self.arm_timers(self.settings.resume_spawn_interval);
        self.phase = GamePhase::Running;
        log::info!("Resumed (cleared meteor {:?})", cleared);
    }

    fn arm_timers(&mut self, spawn_interval: f32) {
        self.clock
            .schedule_interval(TimerName::Tick, self.settings.tick_interval());
        self.clock.schedule_interval(TimerName::Spawn, spawn_interval);
    }

    /// Spawn a fully randomized meteor
    pub fn spawn_meteor(&mut self) -> u32 {
        self.spawn_meteor_with(MeteorOverrides::default())
    }

    /// Spawn a meteor with some parameters pinned
    pub fn spawn_meteor_with(&mut self, overrides: MeteorOverrides) -> u32 {
        let params = self.spawner.roll(&mut self.rng, &self.catalog, overrides);
        self.world.add_meteor(params)
    }

    /// Fire a laser from the ship's current position
    ///
    /// Ignored while paused.
    pub fn fire(&mut self) -> Option<u32> {
        if self.is_paused() {
            return None;
        }
        let sprite = self.catalog.laser;
        let info = self.catalog.get(sprite);
        let laser = Laser {
            id: 0,
            pos: self.ship.pos + Vec2::new(0.0, self.settings.laser_spawn_offset),
            speed: self.settings.laser_speed,
            sprite,
            extents: info.extents(),
            height: info.height,
        };
        Some(self.world.add_laser(laser))
    }

    /// Apply a key transition
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Fire) => {
                self.fire();
            }
            InputEvent::KeyUp(Key::Fire) => {}
            InputEvent::KeyDown(key) => {
                if let Some(key) = key.as_move() {
                    self.ship.press(key);
                }
            }
            InputEvent::KeyUp(key) => {
                if let Some(key) = key.as_move() {
                    self.ship.release(key);
                }
            }
        }
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ship::MoveKey;
    use crate::sim::state::{Extents, MeteorParams};

    const FRAME: f32 = 1.0 / 60.0;

    fn quiet_game() -> Game {
        let settings = Settings {
            initial_meteors: 0,
            ..Settings::default()
        };
        Game::new(settings, SpriteCatalog::builtin()).unwrap()
    }

    fn run(game: &mut Game, seconds: f32) {
        let frames = (seconds / FRAME).round() as u32;
        for _ in 0..frames {
            game.advance(FRAME);
        }
    }

    #[test]
    fn test_new_game_spawns_and_arms() {
        let game = Game::new(Settings::default(), SpriteCatalog::builtin()).unwrap();
        assert_eq!(game.world.meteors.len(), 5);
        assert_eq!(game.phase, GamePhase::Running);
        assert_eq!(game.ship.pos, Vec2::new(600.0, 77.0));
        assert!((game.clock().period(TimerName::Tick).unwrap() - 1.0 / 30.0).abs() < 1e-6);
        assert!((game.clock().period(TimerName::Spawn).unwrap() - 0.3).abs() < 1e-6);
        assert!(!game.clock().is_scheduled(TimerName::Resume));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            hit_pause: -1.0,
            ..Settings::default()
        };
        assert!(Game::new(settings, SpriteCatalog::builtin()).is_err());
    }

    #[test]
    fn test_spawn_timer_adds_meteors() {
        let mut game = quiet_game();
        game.advance(0.31);
        assert_eq!(game.world.meteors.len(), 1);
        game.advance(0.3);
        assert_eq!(game.world.meteors.len(), 2);
    }

    #[test]
    fn test_tick_rate() {
        let mut game = quiet_game();
        run(&mut game, 1.0);
        assert!((29..=30).contains(&game.time_ticks));
    }

    #[test]
    fn test_ship_moves_with_held_keys() {
        let mut game = quiet_game();
        game.handle_input(InputEvent::KeyDown(Key::Right));
        assert!(game.ship.is_held(MoveKey::Right));
        // Thirty ticks at 30 Hz
        game.advance(1.01);
        assert!((game.ship.pos.x - 900.0).abs() < 1.0);

        game.handle_input(InputEvent::KeyUp(Key::Right));
        let x = game.ship.pos.x;
        game.advance(0.5);
        assert_eq!(game.ship.pos.x, x);
    }

    #[test]
    fn test_laser_spawn_and_flight() {
        let mut game = quiet_game();
        game.handle_input(InputEvent::KeyDown(Key::Fire));
        game.handle_input(InputEvent::KeyUp(Key::Fire));
        assert_eq!(game.world.lasers.len(), 1);
        let start = game.world.lasers[0].pos;
        assert_eq!(start, Vec2::new(600.0, 147.0));

        // Ten ticks at 30 Hz
        game.advance(10.0 / 30.0 + 0.001);
        let laser = &game.world.lasers[0];
        assert_eq!(laser.pos.x, 600.0);
        assert!((laser.pos.y - (147.0 + 1000.0 * 10.0 / 30.0)).abs() < 0.5);

        // Gone once above 950 + 54
        game.advance(1.0);
        assert!(game.world.lasers.is_empty());
    }

    #[test]
    fn test_hit_pause_and_resume() {
        let mut game = quiet_game();
        let meteor = game.world.add_meteor(MeteorParams {
            pos: game.ship.pos,
            direction: 180.0,
            speed: 150.0,
            rspeed: 20.0,
            sprite: game.catalog.meteors[0],
            extents: Extents::from_size(64.0, 64.0),
        });
        let other = game.spawn_meteor_with(MeteorOverrides {
            x: Some(100.0),
            ..Default::default()
        });
        game.handle_input(InputEvent::KeyDown(Key::Left));

        game.advance(0.05);
        assert_eq!(game.phase, GamePhase::Paused);
        assert_eq!(game.world.hit_meteor, Some(meteor));
        assert!(!game.clock().is_scheduled(TimerName::Tick));
        assert!(!game.clock().is_scheduled(TimerName::Spawn));
        let hit_at = game.now() - 0.05 + 1.0 / 30.0;
        let resume_at = game.clock().due(TimerName::Resume).unwrap();
        assert!((resume_at - hit_at - 3.0).abs() < 1e-3);

        let frozen: Vec<(u32, Vec2, f32)> = game
            .world
            .meteors
            .iter()
            .map(|m| (m.id, m.pos, m.rotation))
            .collect();
        let ship_pos = game.ship.pos;
        let count = game.world.meteors.len();

        // Fire is ignored while paused
        game.handle_input(InputEvent::KeyDown(Key::Fire));
        assert!(game.world.lasers.is_empty());

        while game.now() + f64::from(FRAME) < resume_at {
            game.advance(FRAME);
            assert!(game.is_paused());
            assert_eq!(game.world.meteors.len(), count);
            assert_eq!(game.ship.pos, ship_pos);
            let now: Vec<(u32, Vec2, f32)> = game
                .world
                .meteors
                .iter()
                .map(|m| (m.id, m.pos, m.rotation))
                .collect();
            assert_eq!(now, frozen);
        }

        game.advance(2.0 * FRAME);
        assert_eq!(game.phase, GamePhase::Running);
        assert!(game.world.meteor(meteor).is_none());
        assert!(game.world.meteor(other).is_some());
        assert!((game.clock().period(TimerName::Tick).unwrap() - 1.0 / 30.0).abs() < 1e-6);
        assert!((game.clock().period(TimerName::Spawn).unwrap() - 0.3).abs() < 1e-6);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::ShipHit { meteor }));
        assert!(events.contains(&GameEvent::Resumed { cleared: Some(meteor) }));

        // Ticking resumes
        let ticks = game.time_ticks;
        game.advance(0.5);
        assert!(game.time_ticks > ticks);
        assert!(game.ship.pos.x < ship_pos.x);
    }

    #[test]
    fn test_determinism() {
        let mut a = Game::new(Settings::default(), SpriteCatalog::builtin()).unwrap();
        let mut b = Game::new(Settings::default(), SpriteCatalog::builtin()).unwrap();
        let inputs = [
            InputEvent::KeyDown(Key::Left),
            InputEvent::KeyDown(Key::Fire),
            InputEvent::KeyUp(Key::Left),
            InputEvent::KeyDown(Key::Up),
        ];
        for input in inputs {
            a.handle_input(input);
            b.handle_input(input);
            run(&mut a, 0.5);
            run(&mut b, 0.5);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ship.pos, b.ship.pos);
        assert_eq!(a.world.meteors.len(), b.world.meteors.len());
        for (ma, mb) in a.world.meteors.iter().zip(&b.world.meteors) {
            assert_eq!(ma.pos, mb.pos);
        }
    }
}
