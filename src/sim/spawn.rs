//! Meteor spawn parameters
//!
//! Every meteor enters just above the top edge at a random x with a random
//! heading, speed, spin and sprite. Any of these can be pinned.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::MeteorParams;
use crate::settings::{Range, Settings};
use crate::sprites::{SpriteCatalog, SpriteId};

/// Fixed values that replace the random roll
#[derive(Debug, Clone, Copy, Default)]
pub struct MeteorOverrides {
    pub x: Option<f32>,
    pub direction: Option<f32>,
    pub speed: Option<f32>,
    pub rspeed: Option<f32>,
    pub sprite: Option<SpriteId>,
}

/// Rolls randomized meteor parameters
#[derive(Debug, Clone)]
pub struct MeteorSpawner {
    width: f32,
    spawn_y: f32,
    direction: Range,
    speed: Range,
    spin: Range,
}

impl MeteorSpawner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            width: settings.window_width,
            spawn_y: settings.window_height + settings.meteor_spawn_margin,
            direction: settings.meteor_direction,
            speed: settings.meteor_speed,
            spin: settings.meteor_spin,
        }
    }

    /// Roll parameters for a new meteor, honouring overrides
    pub fn roll(
        &self,
        rng: &mut Pcg32,
        catalog: &SpriteCatalog,
        overrides: MeteorOverrides,
    ) -> MeteorParams {
        let x = overrides.x.unwrap_or_else(|| rng.random_range(0.0..=self.width));
        let direction = overrides
            .direction
            .unwrap_or_else(|| sample(rng, self.direction));
        let speed = overrides.speed.unwrap_or_else(|| sample(rng, self.speed));
        let rspeed = overrides.rspeed.unwrap_or_else(|| sample(rng, self.spin));
        let pinned = overrides.sprite.filter(|&id| {
            let known = catalog.contains(id);
            if !known {
                log::warn!("Ignoring unknown meteor sprite {}", id.0);
            }
            known
        });
        let sprite = pinned.unwrap_or_else(|| {
            let index = rng.random_range(0..catalog.meteors.len());
            catalog.meteors[index]
        });

        MeteorParams {
            pos: Vec2::new(x, self.spawn_y),
            direction,
            speed,
            rspeed,
            sprite,
            extents: catalog.extents(sprite),
        }
    }
}

fn sample(rng: &mut Pcg32, range: Range) -> f32 {
    rng.random_range(range.min..=range.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rolls_stay_in_range() {
        let settings = Settings::default();
        let catalog = SpriteCatalog::builtin();
        let spawner = MeteorSpawner::new(&settings);
        let mut rng = Pcg32::seed_from_u64(42);

        for _ in 0..500 {
            let p = spawner.roll(&mut rng, &catalog, MeteorOverrides::default());
            assert!(p.pos.x >= 0.0 && p.pos.x <= 1200.0);
            assert_eq!(p.pos.y, 970.0);
            assert!(settings.meteor_direction.contains(p.direction));
            assert!(settings.meteor_speed.contains(p.speed));
            assert!(settings.meteor_spin.contains(p.rspeed));
            assert!(catalog.meteors.contains(&p.sprite));
            assert_eq!(p.extents, catalog.extents(p.sprite));
        }
    }

    #[test]
    fn test_overrides_pin_values() {
        let settings = Settings::default();
        let catalog = SpriteCatalog::builtin();
        let spawner = MeteorSpawner::new(&settings);
        let mut rng = Pcg32::seed_from_u64(1);

        let sprite = catalog.meteors[0];
        let p = spawner.roll(
            &mut rng,
            &catalog,
            MeteorOverrides {
                x: Some(100.0),
                direction: Some(180.0),
                speed: Some(250.0),
                rspeed: Some(0.0),
                sprite: Some(sprite),
            },
        );
        assert_eq!(p.pos, Vec2::new(100.0, 970.0));
        assert_eq!(p.direction, 180.0);
        assert_eq!(p.speed, 250.0);
        assert_eq!(p.rspeed, 0.0);
        assert_eq!(p.sprite, sprite);
    }

    #[test]
    fn test_unknown_sprite_override_is_rolled() {
        let settings = Settings::default();
        let catalog = SpriteCatalog::builtin();
        let spawner = MeteorSpawner::new(&settings);
        let mut rng = Pcg32::seed_from_u64(3);

        let p = spawner.roll(
            &mut rng,
            &catalog,
            MeteorOverrides {
                sprite: Some(SpriteId(999)),
                ..Default::default()
            },
        );
        assert!(catalog.meteors.contains(&p.sprite));
        assert_eq!(p.extents, catalog.extents(p.sprite));
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let settings = Settings::default();
        let catalog = SpriteCatalog::builtin();
        let spawner = MeteorSpawner::new(&settings);
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..10 {
            let pa = spawner.roll(&mut a, &catalog, MeteorOverrides::default());
            let pb = spawner.roll(&mut b, &catalog, MeteorOverrides::default());
            assert_eq!(pa, pb);
        }
    }
}
