// Auto-tiling: pick a visual variant from occupied same-kind neighbours

use super::grid::SparseTileGrid;
use glam::IVec2;

/// Tile kinds whose variants are rewritten by auto-tiling
pub const AUTOTILE_TYPES: &[&str] = &["grass", "stone"];

const RIGHT: u8 = 1;
const LEFT: u8 = 1 << 1;
const UP: u8 = 1 << 2;
const DOWN: u8 = 1 << 3;

const DIRECTIONS: [(IVec2, u8); 4] = [
    (IVec2::new(1, 0), RIGHT),
    (IVec2::new(-1, 0), LEFT),
    (IVec2::new(0, -1), UP),
    (IVec2::new(0, 1), DOWN),
];

/// Neighbour set -> variant
const AUTOTILE_MAP: [(u8, u32); 9] = [
    (RIGHT | DOWN, 0),
    (RIGHT | DOWN | LEFT, 1),
    (LEFT | DOWN, 2),
    (LEFT | UP | DOWN, 3),
    (LEFT | UP, 4),
    (LEFT | UP | RIGHT, 5),
    (RIGHT | UP, 6),
    (RIGHT | UP | DOWN, 7),
    (RIGHT | LEFT | UP | DOWN, 8),
];

fn variant_for(mask: u8) -> Option<u32> {
    AUTOTILE_MAP
        .iter()
        .find(|(set, _)| *set == mask)
        .map(|(_, variant)| *variant)
}

impl SparseTileGrid {
    /// Re-tag auto-tiled kinds from their 4-neighbourhood. Returns how many
    /// tiles changed. Cosmetic only; solidity depends on kind, not variant.
    pub fn autotile(&mut self) -> usize {
        let updates: Vec<(IVec2, u32)> = self
            .tiles
            .values()
            .filter(|tile| AUTOTILE_TYPES.contains(&tile.kind.as_str()))
            .filter_map(|tile| {
                let mask = DIRECTIONS
                    .iter()
                    .filter(|(offset, _)| {
                        self.tiles
                            .get(&(tile.pos + *offset))
                            .is_some_and(|other| other.kind == tile.kind)
                    })
                    .fold(0u8, |mask, (_, bit)| mask | bit);
                variant_for(mask)
                    .filter(|variant| *variant != tile.variant)
                    .map(|variant| (tile.pos, variant))
            })
            .collect();

        for (pos, variant) in &updates {
            if let Some(tile) = self.tiles.get_mut(pos) {
                tile.variant = *variant;
            }
        }
        updates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(grid: &mut SparseTileGrid, kind: &str, w: i32, h: i32) {
        for y in 0..h {
            for x in 0..w {
                grid.place(IVec2::new(x, y), kind, 99);
            }
        }
    }

    fn variant(grid: &SparseTileGrid, x: i32, y: i32) -> u32 {
        grid.tile_at(IVec2::new(x, y)).unwrap().variant
    }

    #[test]
    fn test_autotile_three_by_three() {
        let mut grid = SparseTileGrid::new(16);
        block(&mut grid, "grass", 3, 3);
        grid.autotile();

        assert_eq!(variant(&grid, 0, 0), 0);
        assert_eq!(variant(&grid, 1, 0), 1);
        assert_eq!(variant(&grid, 2, 0), 2);
        assert_eq!(variant(&grid, 2, 1), 3);
        assert_eq!(variant(&grid, 2, 2), 4);
        assert_eq!(variant(&grid, 1, 2), 5);
        assert_eq!(variant(&grid, 0, 2), 6);
        assert_eq!(variant(&grid, 0, 1), 7);
        assert_eq!(variant(&grid, 1, 1), 8);
    }

    #[test]
    fn test_unmatched_set_unchanged() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(0, 0), "stone", 5);
        grid.place(IVec2::new(1, 0), "stone", 5);

        // Only a horizontal neighbour on each side: no table entry
        assert_eq!(grid.autotile(), 0);
        assert_eq!(variant(&grid, 0, 0), 5);
    }

    #[test]
    fn test_other_kinds_ignored() {
        let mut grid = SparseTileGrid::new(16);
        block(&mut grid, "decor", 2, 2);
        assert_eq!(grid.autotile(), 0);
        assert_eq!(variant(&grid, 0, 0), 99);
    }

    #[test]
    fn test_mixed_kinds_do_not_connect() {
        let mut grid = SparseTileGrid::new(16);
        grid.place(IVec2::new(0, 0), "grass", 3);
        grid.place(IVec2::new(1, 0), "stone", 3);
        grid.place(IVec2::new(0, 1), "stone", 3);
        grid.autotile();
        assert_eq!(variant(&grid, 0, 0), 3);
    }

    #[test]
    fn test_autotile_keeps_collision() {
        let mut grid = SparseTileGrid::new(16);
        block(&mut grid, "grass", 3, 3);
        let before = grid.collidable_rects_near(glam::Vec2::new(24.0, 24.0));
        grid.autotile();
        assert_eq!(grid.collidable_rects_near(glam::Vec2::new(24.0, 24.0)), before);
    }
}
