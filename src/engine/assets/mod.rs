// Asset management system
//
// Loads colour-keyed sprite images from disk into named frame sequences.
// Everything is decoded once at startup; the game never touches the
// filesystem for images afterwards.

mod loader;
mod manager;

pub use loader::AssetLoader;
pub use manager::{AssetManager, SpriteSequence, STANDARD_MANIFEST};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Sprite sequence has no frames: {0}")]
    EmptySequence(String),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("test.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: test.png");

        let err = AssetError::EmptySequence("entities/player/idle".to_string());
        assert_eq!(err.to_string(), "Sprite sequence has no frames: entities/player/idle");
    }
}
