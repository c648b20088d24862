//! Sprite catalog
//!
//! The simulation never touches image data. It only needs each sprite's
//! pixel footprint, which determines entity extents for culling and
//! collision. The renderer uses the same ids to pick textures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::Extents;

/// Index into a [`SpriteCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u16);

/// Name and pixel size of one sprite image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteInfo {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl SpriteInfo {
    fn new(name: &str, width: f32, height: f32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
        }
    }

    pub fn extents(&self) -> Extents {
        Extents::from_size(self.width, self.height)
    }
}

/// All sprites a session uses, with role assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteCatalog {
    pub sprites: Vec<SpriteInfo>,
    pub ship: SpriteId,
    pub laser: SpriteId,
    /// Main engine flames (shown while moving up)
    pub rear_flame: SpriteId,
    /// Braking flames (shown while moving down)
    pub front_flame: SpriteId,
    pub background: SpriteId,
    /// Candidates for a newly spawned meteor
    pub meteors: Vec<SpriteId>,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpriteCatalog {
    /// Catalog matching the bundled image set
    pub fn builtin() -> Self {
        let sprites = vec![
            SpriteInfo::new("ship.png", 99.0, 75.0),
            SpriteInfo::new("laser.png", 9.0, 54.0),
            SpriteInfo::new("fire07.png", 16.0, 40.0),
            SpriteInfo::new("fire12.png", 14.0, 31.0),
            SpriteInfo::new("bg.png", 256.0, 256.0),
            SpriteInfo::new("meteor_big1.png", 101.0, 84.0),
            SpriteInfo::new("meteor_big2.png", 120.0, 98.0),
            SpriteInfo::new("meteor_big3.png", 89.0, 82.0),
            SpriteInfo::new("meteor_big4.png", 98.0, 96.0),
            SpriteInfo::new("meteor_med1.png", 43.0, 43.0),
            SpriteInfo::new("meteor_med3.png", 45.0, 40.0),
            SpriteInfo::new("meteor_small1.png", 28.0, 28.0),
            SpriteInfo::new("meteor_small2.png", 29.0, 26.0),
            SpriteInfo::new("meteor_tiny1.png", 18.0, 18.0),
            SpriteInfo::new("meteor_tiny2.png", 16.0, 15.0),
        ];
        let meteors = (5..sprites.len() as u16).map(SpriteId).collect();

        Self {
            sprites,
            ship: SpriteId(0),
            laser: SpriteId(1),
            rear_flame: SpriteId(2),
            front_flame: SpriteId(3),
            background: SpriteId(4),
            meteors,
        }
    }

    /// Load a catalog description from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: SpriteCatalog = serde_json::from_str(&json).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        catalog.validate()?;
        log::info!(
            "Loaded sprite catalog ({} sprites, {} meteors)",
            catalog.sprites.len(),
            catalog.meteors.len()
        );
        Ok(catalog)
    }

    /// Every role must name a sprite in the catalog
    pub fn validate(&self) -> Result<()> {
        if self.meteors.is_empty() {
            return Err(Error::EmptySpriteCatalog);
        }

        let roles = [
            ("ship", self.ship),
            ("laser", self.laser),
            ("rear_flame", self.rear_flame),
            ("front_flame", self.front_flame),
            ("background", self.background),
        ];
        for (name, id) in roles.into_iter().chain(self.meteors.iter().map(|&id| ("meteors", id))) {
            let info = self.sprites.get(id.0 as usize).ok_or_else(|| Error::InvalidSetting {
                name,
                reason: format!("sprite index {} out of range", id.0),
            })?;
            if !(info.width > 0.0 && info.height > 0.0) {
                return Err(Error::InvalidSetting {
                    name,
                    reason: format!("sprite {} has no area", info.name),
                });
            }
        }
        Ok(())
    }

    /// Does `id` name a sprite in this catalog?
    pub fn contains(&self, id: SpriteId) -> bool {
        (id.0 as usize) < self.sprites.len()
    }

    /// Look up a sprite by id
    ///
    /// Ids come from a validated catalog, so a miss is a programming error.
    pub fn get(&self, id: SpriteId) -> &SpriteInfo {
        &self.sprites[id.0 as usize]
    }

    pub fn extents(&self, id: SpriteId) -> Extents {
        self.get(id).extents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = SpriteCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.meteors.len(), 10);
        assert!(catalog.meteors.iter().all(|&id| catalog.get(id).name.starts_with("meteor")));
    }

    #[test]
    fn test_extents_from_sprite() {
        let catalog = SpriteCatalog::builtin();
        let ship = catalog.extents(catalog.ship);
        assert_eq!(ship.max, 99.0);
        assert_eq!(ship.min, 75.0);
    }

    #[test]
    fn test_empty_meteors_rejected() {
        let mut catalog = SpriteCatalog::builtin();
        catalog.meteors.clear();
        assert!(matches!(catalog.validate(), Err(Error::EmptySpriteCatalog)));
    }

    #[test]
    fn test_load_round_trip() {
        let catalog = SpriteCatalog::builtin();
        let path = std::env::temp_dir().join(format!("meteor-shower-sprites-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let loaded = SpriteCatalog::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.sprites.len(), catalog.sprites.len());
        assert_eq!(loaded.meteors, catalog.meteors);
        assert_eq!(loaded.ship, catalog.ship);
        assert_eq!(loaded.extents(loaded.laser), catalog.extents(catalog.laser));
    }

    #[test]
    fn test_load_rejects_catalog_without_meteors() {
        let mut catalog = SpriteCatalog::builtin();
        catalog.meteors.clear();
        let path = std::env::temp_dir().join(format!("meteor-shower-empty-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let err = SpriteCatalog::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::EmptySpriteCatalog));
    }

    #[test]
    fn test_contains() {
        let catalog = SpriteCatalog::builtin();
        assert!(catalog.contains(catalog.ship));
        assert!(!catalog.contains(SpriteId(999)));
    }

    #[test]
    fn test_dangling_role_rejected() {
        let mut catalog = SpriteCatalog::builtin();
        catalog.laser = SpriteId(999);
        assert!(matches!(
            catalog.validate(),
            Err(Error::InvalidSetting { name: "laser", .. })
        ));
    }
}
