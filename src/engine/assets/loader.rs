// Asset loading functionality

use super::AssetError;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// File extensions accepted as images
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Pure black is the transparency key for every sprite
const COLOR_KEY: [u8; 3] = [0, 0, 0];

/// Make every pixel matching the colour key fully transparent
pub fn apply_color_key(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        if pixel[0] == COLOR_KEY[0] && pixel[1] == COLOR_KEY[1] && pixel[2] == COLOR_KEY[2] {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Asset loader responsible for finding and loading image files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Check if an asset exists
    pub fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).exists()
    }

    /// Load one image, colour-keyed
    pub fn load_image(&self, name: &str) -> Result<RgbaImage, AssetError> {
        let path = self.resolve_path(name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let mut image = image::open(&path)
            .map_err(|source| AssetError::Decode {
                path: path.to_string_lossy().to_string(),
                source,
            })?
            .to_rgba8();
        apply_color_key(&mut image);
        Ok(image)
    }

    /// List the image files in a directory, sorted by file name
    pub fn list_images(&self, dir: &str) -> Result<Vec<String>, AssetError> {
        let path = self.resolve_path(dir);
        if !path.is_dir() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&path)? {
            let entry = entry?;
            let file = entry.path();
            if !file.is_file() {
                continue;
            }
            let is_image = file
                .extension()
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()))
                .unwrap_or(false);
            if is_image {
                if let Some(name) = file.file_name() {
                    names.push(name.to_string_lossy().to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Load every image in a directory in file-name order
    pub fn load_sequence(&self, dir: &str) -> Result<Vec<RgbaImage>, AssetError> {
        let names = self.list_images(dir)?;
        if names.is_empty() {
            return Err(AssetError::EmptySequence(dir.to_string()));
        }

        let dir_path = Path::new(dir);
        names
            .iter()
            .map(|name| self.load_image(&dir_path.join(name).to_string_lossy()))
            .collect()
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, color: [u8; 4]) {
        RgbaImage::from_pixel(2, 2, Rgba(color)).save(path).unwrap();
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/data/images");
        let path = loader.resolve_path("entities/player/idle");
        assert_eq!(path.to_str().unwrap(), "/game/data/images/entities/player/idle");
    }

    #[test]
    fn test_color_key() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([1, 0, 0, 255]));
        apply_color_key(&mut image);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(1, 0)[3], 255);
    }

    #[test]
    fn test_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());
        assert!(matches!(loader.load_image("nope.png"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_sequence_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let run = dir.path().join("run");
        std::fs::create_dir(&run).unwrap();
        write_png(&run.join("02.png"), [0, 0, 255, 255]);
        write_png(&run.join("00.png"), [255, 0, 0, 255]);
        write_png(&run.join("01.png"), [0, 255, 0, 255]);
        std::fs::write(run.join("notes.txt"), "skip me").unwrap();

        let loader = AssetLoader::new(dir.path());
        assert_eq!(loader.list_images("run").unwrap(), vec!["00.png", "01.png", "02.png"]);

        let frames = loader.load_sequence("run").unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].get_pixel(0, 0)[0], 255);
        assert_eq!(frames[2].get_pixel(0, 0)[2], 255);
    }

    #[test]
    fn test_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();
        let loader = AssetLoader::new(dir.path());
        assert!(matches!(loader.load_sequence("empty"), Err(AssetError::EmptySequence(_))));
    }
}
