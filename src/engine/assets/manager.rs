// Central asset management system

use super::{AssetError, AssetLoader};
use glam::UVec2;
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

/// How a manifest entry is stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestSource {
    /// A single image file
    Image(&'static str),
    /// A directory of frames, loaded in file-name order
    Sequence(&'static str),
}

/// Every sprite the game draws, keyed by the name game code looks it up with
pub const STANDARD_MANIFEST: &[(&str, ManifestSource)] = &[
    ("background", ManifestSource::Image("background.png")),
    ("projectile", ManifestSource::Image("projectile.png")),
    ("grass", ManifestSource::Sequence("tiles/grass")),
    ("stone", ManifestSource::Sequence("tiles/stone")),
    ("decor", ManifestSource::Sequence("tiles/decor")),
    ("large_decor", ManifestSource::Sequence("tiles/large_decor")),
    ("player/idle", ManifestSource::Sequence("entities/player/idle")),
    ("player/run", ManifestSource::Sequence("entities/player/run")),
    ("player/jump", ManifestSource::Sequence("entities/player/jump")),
    ("player/wall_slide", ManifestSource::Sequence("entities/player/wall_slide")),
    ("enemy/idle", ManifestSource::Sequence("entities/enemy/idle")),
    ("enemy/run", ManifestSource::Sequence("entities/enemy/run")),
];

/// Ordered animation frames, or tile variants, sharing one name
#[derive(Debug, Clone)]
pub struct SpriteSequence {
    frames: Vec<RgbaImage>,
}

impl SpriteSequence {
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame by index, `None` past the end
    pub fn get(&self, index: usize) -> Option<&RgbaImage> {
        self.frames.get(index)
    }

    /// Frame by index, clamped to the last frame
    pub fn frame(&self, index: usize) -> Option<&RgbaImage> {
        self.frames.get(index.min(self.frames.len().saturating_sub(1)))
    }

    /// Size of the first frame
    pub fn frame_size(&self) -> UVec2 {
        self.frames
            .first()
            .map(|f| UVec2::new(f.width(), f.height()))
            .unwrap_or(UVec2::ZERO)
    }
}

/// Central asset manager for the game
///
/// Owns every decoded sprite. Lookups are by manifest name, e.g. `"player/run"`.
#[derive(Default)]
pub struct AssetManager {
    sequences: HashMap<String, SpriteSequence>,
}

impl AssetManager {
    /// Create an empty asset manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every entry of [`STANDARD_MANIFEST`]. Any missing or undecodable
    /// entry aborts the whole load.
    pub fn load_standard(loader: &AssetLoader) -> Result<Self, AssetError> {
        let mut manager = Self::new();
        for (name, source) in STANDARD_MANIFEST {
            let frames = match source {
                ManifestSource::Image(path) => vec![loader.load_image(path)?],
                ManifestSource::Sequence(dir) => loader.load_sequence(dir)?,
            };
            log::debug!("Loaded {} ({} frames)", name, frames.len());
            manager.insert(*name, SpriteSequence::new(frames));
        }
        log::info!(
            "Loaded {} sprite sets from {}",
            manager.len(),
            loader.base_path().display()
        );
        Ok(manager)
    }

    pub fn insert(&mut self, name: impl Into<String>, sequence: SpriteSequence) {
        self.sequences.insert(name.into(), sequence);
    }

    /// Register a single solid-colour frame under `name`
    pub fn insert_color(&mut self, name: impl Into<String>, size: UVec2, color: [u8; 4]) {
        let frame = RgbaImage::from_pixel(size.x.max(1), size.y.max(1), Rgba(color));
        self.insert(name, SpriteSequence::new(vec![frame]));
    }

    pub fn get(&self, name: &str) -> Option<&SpriteSequence> {
        self.sequences.get(name)
    }

    /// First frame of a sequence
    pub fn image(&self, name: &str) -> Option<&RgbaImage> {
        self.get(name).and_then(|seq| seq.get(0))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut assets = AssetManager::new();
        assets.insert_color("projectile", UVec2::new(4, 2), [255, 255, 255, 255]);

        let seq = assets.get("projectile").unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.frame_size(), UVec2::new(4, 2));
        assert!(assets.get("player/idle").is_none());
    }

    #[test]
    fn test_frame_clamps() {
        let seq = SpriteSequence::new(vec![RgbaImage::new(1, 1), RgbaImage::new(2, 2)]);
        assert_eq!(seq.frame(10).unwrap().width(), 2);
        assert!(seq.get(10).is_none());
    }

    #[test]
    fn test_load_standard_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        assert!(matches!(AssetManager::load_standard(&loader), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_load_standard_full_tree() {
        let dir = tempfile::tempdir().unwrap();
        let frame = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        for (_, source) in STANDARD_MANIFEST {
            match source {
                ManifestSource::Image(path) => {
                    frame.save(dir.path().join(path)).unwrap();
                }
                ManifestSource::Sequence(sub) => {
                    let sub = dir.path().join(sub);
                    std::fs::create_dir_all(&sub).unwrap();
                    frame.save(sub.join("0.png")).unwrap();
                    frame.save(sub.join("1.png")).unwrap();
                }
            }
        }

        let assets = AssetManager::load_standard(&AssetLoader::new(dir.path())).unwrap();
        assert_eq!(assets.len(), STANDARD_MANIFEST.len());
        assert_eq!(assets.get("player/run").unwrap().len(), 2);
        assert_eq!(assets.get("background").unwrap().len(), 1);
    }
}
