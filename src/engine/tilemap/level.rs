// Level documents: JSON persistence for the sparse tile grid

use super::grid::{Decoration, SparseTileGrid, Tile};
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

/// Level loading errors
#[derive(Debug, thiserror::Error)]
pub enum LevelLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed level document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tile key: {0:?}")]
    InvalidKey(String),

    #[error("Tile key {key:?} does not match its position {pos:?}")]
    KeyMismatch { key: String, pos: [i32; 2] },

    #[error("Invalid tile size: {0}")]
    InvalidTileSize(i64),

    #[error("Tile size {tile_size} is smaller than a {body} px body")]
    TileSmallerThanBody { tile_size: u32, body: f32 },
}

/// Level saving errors
#[derive(Debug, thiserror::Error)]
pub enum LevelSaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize level: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of a load attempt that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document replaced the grid contents
    Loaded { tiles: usize },
    /// No file at the path; the grid was not touched
    Missing,
}

#[derive(Debug, Serialize, Deserialize)]
struct TileRecord {
    #[serde(rename = "type")]
    kind: String,
    variant: u32,
    pos: [i32; 2],
}

#[derive(Debug, Serialize, Deserialize)]
struct DecorationRecord {
    #[serde(rename = "type")]
    kind: String,
    variant: u32,
    pos: [f32; 2],
}

#[derive(Debug, Serialize, Deserialize)]
struct LevelDocument {
    tilemap: BTreeMap<String, TileRecord>,
    #[serde(rename = "tileSize", alias = "tile_size")]
    tile_size: i64,
    #[serde(default)]
    offgrid: Vec<DecorationRecord>,
}

/// Persisted form of a grid key
pub fn encode_key(pos: IVec2) -> String {
    format!("{};{}", pos.x, pos.y)
}

/// Parse an `"x;y"` key back into a grid coordinate
pub fn decode_key(key: &str) -> Result<IVec2, LevelLoadError> {
    let invalid = || LevelLoadError::InvalidKey(key.to_string());
    let (x, y) = key.split_once(';').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(IVec2::new(x, y))
}

impl LevelDocument {
    fn from_grid(grid: &SparseTileGrid) -> Self {
        let tilemap = grid
            .tiles
            .values()
            .map(|tile| {
                (
                    encode_key(tile.pos),
                    TileRecord {
                        kind: tile.kind.clone(),
                        variant: tile.variant,
                        pos: tile.pos.to_array(),
                    },
                )
            })
            .collect();

        let offgrid = grid
            .decorations
            .iter()
            .map(|decor| DecorationRecord {
                kind: decor.kind.clone(),
                variant: decor.variant,
                pos: decor.pos.to_array(),
            })
            .collect();

        Self {
            tilemap,
            tile_size: i64::from(grid.tile_size()),
            offgrid,
        }
    }

    fn into_grid(self) -> Result<SparseTileGrid, LevelLoadError> {
        let tile_size = u32::try_from(self.tile_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(LevelLoadError::InvalidTileSize(self.tile_size))?;

        let mut tiles = HashMap::with_capacity(self.tilemap.len());
        for (key, record) in self.tilemap {
            let pos = decode_key(&key)?;
            if pos.to_array() != record.pos {
                return Err(LevelLoadError::KeyMismatch { key, pos: record.pos });
            }
            tiles.insert(pos, Tile::new(record.kind, record.variant, pos));
        }

        let mut grid = SparseTileGrid::new(tile_size);
        grid.tiles = tiles;
        grid.decorations = self
            .offgrid
            .into_iter()
            .map(|record| Decoration::new(record.kind, record.variant, Vec2::from_array(record.pos)))
            .collect();
        Ok(grid)
    }
}

impl SparseTileGrid {
    /// Write the grid to a JSON level document
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelSaveError> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &LevelDocument::from_grid(self))?;
        log::info!("Saved level {} ({} tiles)", path.display(), self.tile_count());
        Ok(())
    }

    /// Replace the grid contents with a level document.
    ///
    /// A missing file is reported as [`LoadOutcome::Missing`] and leaves the
    /// grid as it was. A malformed document is an error and also leaves the
    /// grid untouched, since the document is fully validated before swapping.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome, LevelLoadError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::warn!("Level file {} not found", path.display());
                return Ok(LoadOutcome::Missing);
            }
            Err(err) => return Err(err.into()),
        };

        let document: LevelDocument = serde_json::from_reader(BufReader::new(file))?;
        let loaded = document.into_grid()?;

        self.set_tile_size(loaded.tile_size());
        self.tiles = loaded.tiles;
        self.decorations = loaded.decorations;

        let tiles = self.tile_count();
        log::info!("Loaded level {} ({} tiles)", path.display(), tiles);
        Ok(LoadOutcome::Loaded { tiles })
    }
}
