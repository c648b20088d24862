//! Meteor Shower entry point
//!
//! Native headless runner: loads settings, lets the autopilot play a
//! session at 60 fps and builds a render frame every frame.
//!
//! Usage: `meteor-shower [settings.json] [sprites.json]`

use std::path::PathBuf;

use meteor_shower::Settings;
use meteor_shower::renderer::{Layer, build_frame};
use meteor_shower::sim::{Autopilot, Game, GameEvent};
use meteor_shower::sprites::SpriteCatalog;

/// Frame interval of the runner (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest frame handed to the simulation after a stall
const MAX_FRAME_DT: f32 = 0.1;
/// Demo session length
const SESSION_FRAMES: u32 = 60 * 60;

#[derive(Debug, Default)]
struct SessionStats {
    spawned: u32,
    destroyed: u32,
    culled: u32,
    shots: u32,
    hits: u32,
    peak_sprites: usize,
}

impl SessionStats {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::MeteorSpawned { .. } => self.spawned += 1,
            GameEvent::MeteorDestroyed { .. } => self.destroyed += 1,
            GameEvent::MeteorCulled { .. } => self.culled += 1,
            GameEvent::LaserFired { .. } => self.shots += 1,
            GameEvent::ShipHit { meteor } => {
                self.hits += 1;
                log::warn!("Ship hit by meteor {}", meteor);
            }
            GameEvent::LaserExpired { .. } | GameEvent::Resumed { .. } => {}
        }
    }
}

fn run() -> Result<(), meteor_shower::Error> {
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let settings_path = args.next();
    let catalog_path = args.next();

    let settings = Settings::load_or_default(settings_path.as_deref())?;
    let catalog = match catalog_path {
        Some(path) => SpriteCatalog::load(&path)?,
        None => SpriteCatalog::builtin(),
    };

    let mut game = Game::new(settings, catalog)?;
    let mut pilot = Autopilot::new();
    let mut stats = SessionStats::default();

    for _ in 0..SESSION_FRAMES {
        for event in pilot.plan(&game.ship, &game.world, game.now()) {
            game.handle_input(event);
        }
        game.advance(FRAME_DT.min(MAX_FRAME_DT));

        for event in game.drain_events() {
            stats.record(event);
        }

        let frame = build_frame(&game);
        stats.peak_sprites = stats.peak_sprites.max(frame.len());
        log::trace!(
            "frame: {} meteors, {} lasers",
            frame.count(Layer::Meteor),
            frame.count(Layer::Laser)
        );
    }

    log::info!(
        "Session over after {:.1}s ({} ticks): {} meteors spawned, {} shot down, {} drifted off, {} shots, {} hits, peak {} sprites",
        game.now(),
        game.time_ticks,
        stats.spawned,
        stats.destroyed,
        stats.culled,
        stats.shots,
        stats.hits,
        stats.peak_sprites
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Meteor Shower (native) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
