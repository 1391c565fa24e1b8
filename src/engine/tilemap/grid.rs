// Sparse tile grid storage and spatial queries

use crate::core::Rect;
use glam::{IVec2, UVec2, Vec2};
use std::collections::HashMap;

/// Tile kinds that block movement. Everything else is render-only.
pub const PHYSICS_TILES: &[&str] = &["grass", "stone"];

/// Offsets of the 3x3 Moore neighbourhood, including the centre cell
const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(0, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// A grid-aligned tile. Identity is its grid coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub kind: String,
    pub variant: u32,
    pub pos: IVec2,
}

impl Tile {
    pub fn new(kind: impl Into<String>, variant: u32, pos: IVec2) -> Self {
        Self {
            kind: kind.into(),
            variant,
            pos,
        }
    }

    /// Whether this tile takes part in collision
    pub fn is_solid(&self) -> bool {
        is_solid_kind(&self.kind)
    }
}

/// A render-only sprite placed at an arbitrary pixel position
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub kind: String,
    pub variant: u32,
    pub pos: Vec2,
}

impl Decoration {
    pub fn new(kind: impl Into<String>, variant: u32, pos: Vec2) -> Self {
        Self {
            kind: kind.into(),
            variant,
            pos,
        }
    }
}

/// A tile or decoration pulled out of the map, with its pixel-space position
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTile {
    pub kind: String,
    pub variant: u32,
    pub pos: Vec2,
}

/// Check a tile kind against the solid allow-set
pub fn is_solid_kind(kind: &str) -> bool {
    PHYSICS_TILES.contains(&kind)
}

/// Sparse tile storage: only occupied cells exist, so disconnected islands
/// cost nothing for the empty space between them.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseTileGrid {
    tile_size: u32,
    pub(super) tiles: HashMap<IVec2, Tile>,
    pub(super) decorations: Vec<Decoration>,
}

impl SparseTileGrid {
    /// Create an empty grid. A zero tile size is bumped to 1.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size: tile_size.max(1),
            tiles: HashMap::new(),
            decorations: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub(super) fn set_tile_size(&mut self, tile_size: u32) {
        self.tile_size = tile_size.max(1);
    }

    /// Convert a pixel position to the grid cell containing it (floor division)
    pub fn pixel_to_grid(&self, pixel: Vec2) -> IVec2 {
        (pixel / self.tile_size as f32).floor().as_ivec2()
    }

    /// Pixel-space rectangle covered by a grid cell
    pub fn cell_rect(&self, grid_pos: IVec2) -> Rect {
        let size = self.tile_size as f32;
        Rect::new(grid_pos.x as f32 * size, grid_pos.y as f32 * size, size, size)
    }

    pub fn tile_at(&self, grid_pos: IVec2) -> Option<&Tile> {
        self.tiles.get(&grid_pos)
    }

    /// Place a tile, replacing whatever occupied the cell before
    pub fn place(&mut self, grid_pos: IVec2, kind: impl Into<String>, variant: u32) -> Option<Tile> {
        self.tiles.insert(grid_pos, Tile::new(kind, variant, grid_pos))
    }

    pub fn remove(&mut self, grid_pos: IVec2) -> Option<Tile> {
        self.tiles.remove(&grid_pos)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn place_decoration(&mut self, kind: impl Into<String>, variant: u32, pos: Vec2) {
        self.decorations.push(Decoration::new(kind, variant, pos));
    }

    /// Remove every decoration whose sprite rectangle contains `point`.
    /// `size_of` supplies the sprite size, which only the asset side knows.
    pub fn remove_decorations_at<F>(&mut self, point: Vec2, size_of: F) -> usize
    where
        F: Fn(&Decoration) -> Vec2,
    {
        let before = self.decorations.len();
        self.decorations
            .retain(|decor| !Rect::from_pos_size(decor.pos, size_of(decor)).contains_point(point));
        before - self.decorations.len()
    }

    /// Remove the grid tile under `point` and every decoration covering it.
    /// Returns how many items were removed.
    pub fn erase_at<F>(&mut self, point: Vec2, size_of: F) -> usize
    where
        F: Fn(&Decoration) -> Vec2,
    {
        let tile = usize::from(self.remove(self.pixel_to_grid(point)).is_some());
        tile + self.remove_decorations_at(point, size_of)
    }

    /// Drop all tiles and decorations
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.decorations.clear();
    }

    /// Tiles in the 3x3 neighbourhood of the cell containing `pixel`
    pub fn neighbors(&self, pixel: Vec2) -> Vec<&Tile> {
        let center = self.pixel_to_grid(pixel);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|offset| self.tiles.get(&(center + *offset)))
            .collect()
    }

    /// Collision boxes of the solid tiles around `pixel`
    pub fn collidable_rects_near(&self, pixel: Vec2) -> Vec<Rect> {
        self.neighbors(pixel)
            .into_iter()
            .filter(|tile| tile.is_solid())
            .map(|tile| self.cell_rect(tile.pos))
            .collect()
    }

    /// Whether a pixel lies inside a solid tile
    pub fn is_solid_at(&self, pixel: Vec2) -> bool {
        self.tile_at(self.pixel_to_grid(pixel))
            .is_some_and(Tile::is_solid)
    }

    /// Pull matching markers (e.g. spawn points) out of the map.
    ///
    /// Decorations come first in placement order, then grid tiles in
    /// coordinate order so the result is deterministic. Grid tiles are reported
    /// at their pixel position. Matches are removed unless `keep` is set.
    pub fn extract(&mut self, pairs: &[(&str, u32)], keep: bool) -> Vec<ExtractedTile> {
        let matches = |kind: &str, variant: u32| pairs.iter().any(|&(k, v)| k == kind && v == variant);
        let mut found = Vec::new();

        for decor in &self.decorations {
            if matches(&decor.kind, decor.variant) {
                found.push(ExtractedTile {
                    kind: decor.kind.clone(),
                    variant: decor.variant,
                    pos: decor.pos,
                });
            }
        }
        if !keep {
            self.decorations.retain(|decor| !matches(&decor.kind, decor.variant));
        }

        let mut cells: Vec<IVec2> = self
            .tiles
            .values()
            .filter(|tile| matches(&tile.kind, tile.variant))
            .map(|tile| tile.pos)
            .collect();
        cells.sort_by_key(|pos| (pos.y, pos.x));

        for cell in cells {
            let tile = if keep {
                self.tiles.get(&cell).cloned()
            } else {
                self.tiles.remove(&cell)
            };
            if let Some(tile) = tile {
                found.push(ExtractedTile {
                    pos: self.cell_rect(tile.pos).position(),
                    kind: tile.kind,
                    variant: tile.variant,
                });
            }
        }

        found
    }

    /// Tiles whose cells overlap a viewport at `offset` of `view_size` pixels
    pub fn visible_tiles(&self, offset: IVec2, view_size: UVec2) -> Vec<&Tile> {
        let size = self.tile_size as i32;
        let min = IVec2::new(offset.x.div_euclid(size), offset.y.div_euclid(size));
        let max = IVec2::new(
            (offset.x + view_size.x as i32).div_euclid(size),
            (offset.y + view_size.y as i32).div_euclid(size),
        );

        let mut visible = Vec::new();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                if let Some(tile) = self.tiles.get(&IVec2::new(x, y)) {
                    visible.push(tile);
                }
            }
        }
        visible
    }
}

impl Default for SparseTileGrid {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_grid() -> SparseTileGrid {
        let mut grid = SparseTileGrid::new(16);
        for x in 3..13 {
            grid.place(IVec2::new(x, 10), "grass", 1);
        }
        grid
    }

    #[test]
    fn test_place_and_lookup() {
        let mut grid = SparseTileGrid::new(16);
        assert!(grid.tile_at(IVec2::new(2, 3)).is_none());

        grid.place(IVec2::new(2, 3), "stone", 4);
        let tile = grid.tile_at(IVec2::new(2, 3)).unwrap();
        assert_eq!(tile.kind, "stone");
        assert_eq!(tile.variant, 4);
        assert_eq!(tile.pos, IVec2::new(2, 3));
    }

    #[test]
    fn test_place_overwrites() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(0, 0), "stone", 0);
        let previous = grid.place(IVec2::new(0, 0), "grass", 2);

        assert_eq!(previous.unwrap().kind, "stone");
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.tile_at(IVec2::ZERO).unwrap().kind, "grass");
    }

    #[test]
    fn test_remove() {
        let mut grid = floor_grid();
        assert!(grid.remove(IVec2::new(3, 10)).is_some());
        assert!(grid.remove(IVec2::new(3, 10)).is_none());
        assert_eq!(grid.tile_count(), 9);
    }

    #[test]
    fn test_pixel_to_grid_floors_negative() {
        let grid = SparseTileGrid::new(16);
        assert_eq!(grid.pixel_to_grid(Vec2::new(15.9, 16.0)), IVec2::new(0, 1));
        assert_eq!(grid.pixel_to_grid(Vec2::new(-0.5, -16.0)), IVec2::new(-1, -1));
    }

    #[test]
    fn test_neighbors_moore_neighbourhood() {
        let mut grid = SparseTileGrid::new(16);
        for y in -2..=2 {
            for x in -2..=2 {
                grid.place(IVec2::new(x, y), "stone", 0);
            }
        }

        let around = grid.neighbors(Vec2::new(8.0, 8.0));
        assert_eq!(around.len(), 9);
        assert!(around.iter().all(|t| t.pos.x.abs() <= 1 && t.pos.y.abs() <= 1));
    }

    #[test]
    fn test_neighbors_sparse() {
        let grid = floor_grid();
        assert_eq!(grid.neighbors(Vec2::new(100.0, 150.0)).len(), 3);
        assert!(grid.neighbors(Vec2::new(-500.0, -500.0)).is_empty());
    }

    #[test]
    fn test_collidable_rects_skip_decor_kinds() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(0, 0), "stone", 0);
        grid.place(IVec2::new(1, 0), "decor", 0);
        grid.place(IVec2::new(0, 1), "grass", 0);

        let rects = grid.collidable_rects_near(Vec2::new(4.0, 4.0));
        assert_eq!(rects.len(), 2);
        assert!(rects.contains(&Rect::new(0.0, 0.0, 16.0, 16.0)));
        assert!(rects.contains(&Rect::new(0.0, 16.0, 16.0, 16.0)));
    }

    #[test]
    fn test_is_solid_at() {
        let grid = floor_grid();
        assert!(grid.is_solid_at(Vec2::new(50.0, 165.0)));
        assert!(!grid.is_solid_at(Vec2::new(50.0, 150.0)));
        assert!(!grid.is_solid_at(Vec2::new(300.0, 165.0)));
    }

    #[test]
    fn test_extract_removes_unless_kept() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(4, 2), "spawners", 1);
        grid.place(IVec2::new(1, 2), "spawners", 1);
        grid.place(IVec2::new(0, 0), "spawners", 0);
        grid.place_decoration("spawners", 1, Vec2::new(3.5, 7.0));
        grid.place_decoration("large_decor", 2, Vec2::new(40.0, 7.0));

        let kept = grid.extract(&[("spawners", 1)], true);
        assert_eq!(kept.len(), 3);
        assert_eq!(grid.tile_count(), 3);

        let taken = grid.extract(&[("spawners", 1)], false);
        assert_eq!(taken[0].pos, Vec2::new(3.5, 7.0));
        assert_eq!(taken[1].pos, Vec2::new(16.0, 32.0));
        assert_eq!(taken[2].pos, Vec2::new(64.0, 32.0));
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.decorations().len(), 1);
    }

    #[test]
    fn test_erase_at_takes_tile_and_decor() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(0, 0), "grass", 0);
        grid.place(IVec2::new(1, 0), "grass", 0);
        grid.place_decoration("decor", 0, Vec2::new(4.0, 4.0));

        assert_eq!(grid.erase_at(Vec2::new(6.0, 6.0), |_| Vec2::new(8.0, 8.0)), 2);
        assert!(grid.tile_at(IVec2::new(0, 0)).is_none());
        assert!(grid.tile_at(IVec2::new(1, 0)).is_some());
        assert!(grid.decorations().is_empty());
        assert_eq!(grid.erase_at(Vec2::new(6.0, 6.0), |_| Vec2::new(8.0, 8.0)), 0);
    }

    #[test]
    fn test_remove_decorations_at() {
        let mut grid = SparseTileGrid::new(16);
        grid.place_decoration("decor", 0, Vec2::new(10.0, 10.0));
        grid.place_decoration("decor", 1, Vec2::new(100.0, 10.0));

        let removed = grid.remove_decorations_at(Vec2::new(12.0, 12.0), |_| Vec2::new(8.0, 8.0));
        assert_eq!(removed, 1);
        assert_eq!(grid.decorations()[0].variant, 1);
    }

    #[test]
    fn test_visible_tiles_culls_offscreen() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(0, 0), "grass", 0);
        grid.place(IVec2::new(20, 0), "grass", 0);
        grid.place(IVec2::new(100, 100), "grass", 0);

        let visible = grid.visible_tiles(IVec2::ZERO, UVec2::new(320, 240));
        assert_eq!(visible.len(), 2);

        let scrolled = grid.visible_tiles(IVec2::new(1500, 1500), UVec2::new(320, 240));
        assert_eq!(scrolled.len(), 1);
        assert_eq!(scrolled[0].pos, IVec2::new(100, 100));
    }
}
