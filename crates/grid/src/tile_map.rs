//! Sparse tile store.
//!
//! Grid coordinates map to at most one live [`TileRecord`]; `insert` replaces
//! any record already at the coordinate, so the uniqueness invariant holds by
//! construction. The store grows without bound and never evicts — maps are
//! authored content, not a cache. All mutation happens on the main schedule
//! through `ResMut`, so there is no concurrency control to speak of.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use crate::coords::GridPos;
use crate::tile::TileRecord;

#[derive(Resource, Debug)]
pub struct TileMap {
    tiles: HashMap<GridPos, TileRecord>,
    /// Declared (map file) or generated dimensions. Informational: tiles may
    /// legally sit outside these bounds, see [`bounds`](Self::bounds) for the
    /// actual occupied extent.
    pub dimensions: (u32, u32),
}

impl Default for TileMap {
    fn default() -> Self {
        Self {
            tiles: HashMap::new(),
            dimensions: (DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT),
        }
    }
}

impl TileMap {
    pub fn new(dimensions: (u32, u32)) -> Self {
        Self {
            tiles: HashMap::new(),
            dimensions,
        }
    }

    /// Insert a tile, replacing any record already at `pos`.
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, pos: GridPos, tile: TileRecord) -> Option<TileRecord> {
        self.tiles.insert(pos, tile)
    }

    pub fn get(&self, pos: GridPos) -> Option<&TileRecord> {
        self.tiles.get(&pos)
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut TileRecord> {
        self.tiles.get_mut(&pos)
    }

    pub fn remove(&mut self, pos: GridPos) -> Option<TileRecord> {
        self.tiles.remove(&pos)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// Destroy every tile record. Dimensions are kept.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &TileRecord)> {
        self.tiles.iter().map(|(pos, tile)| (*pos, tile))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GridPos, &mut TileRecord)> {
        self.tiles.iter_mut().map(|(pos, tile)| (*pos, tile))
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.tiles.keys().copied()
    }

    /// Occupied extent as (min, max) grid corners, or `None` when empty.
    /// Recomputed on demand; the store keeps no running bounds.
    pub fn bounds(&self) -> Option<(GridPos, GridPos)> {
        let mut iter = self.tiles.keys();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);
        for pos in iter {
            min.x = min.x.min(pos.x);
            min.y = min.y.min(pos.y);
            max.x = max.x.max(pos.x);
            max.y = max.y.max(pos.y);
        }
        Some((min, max))
    }

    /// Clear the highlight flag everywhere, then set it at `pos` if a tile
    /// lives there. Hover is exclusive by definition.
    pub fn set_exclusive_highlight(&mut self, pos: Option<GridPos>) {
        for tile in self.tiles.values_mut() {
            tile.highlighted = false;
        }
        if let Some(pos) = pos {
            if let Some(tile) = self.tiles.get_mut(&pos) {
                tile.highlighted = true;
            }
        }
    }

    /// Exclusive selection, same shape as highlight. Selecting the already
    /// selected tile deselects it; returns the now-selected position.
    pub fn toggle_exclusive_selection(&mut self, pos: GridPos) -> Option<GridPos> {
        let was_selected = self.tiles.get(&pos).is_some_and(|t| t.selected);
        for tile in self.tiles.values_mut() {
            tile.selected = false;
        }
        if was_selected || !self.tiles.contains_key(&pos) {
            return None;
        }
        if let Some(tile) = self.tiles.get_mut(&pos) {
            tile.selected = true;
        }
        Some(pos)
    }

    pub fn clear_selection(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.selected = false;
        }
    }

    pub fn selected_pos(&self) -> Option<GridPos> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.selected)
            .map(|(pos, _)| *pos)
    }

    pub fn highlighted_pos(&self) -> Option<GridPos> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.highlighted)
            .map(|(pos, _)| *pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass(pos: (i32, i32)) -> (GridPos, TileRecord) {
        (GridPos::new(pos.0, pos.1), TileRecord::new("grass", 0.0))
    }

    #[test]
    fn test_insert_replaces_at_same_position() {
        let mut map = TileMap::default();
        let pos = GridPos::new(3, 4);
        assert!(map.insert(pos, TileRecord::new("grass", 0.0)).is_none());
        let replaced = map.insert(pos, TileRecord::new("water", 0.0));
        assert_eq!(replaced.unwrap().kind, "grass");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(pos).unwrap().kind, "water");
    }

    #[test]
    fn test_clear_destroys_all_records() {
        let mut map = TileMap::default();
        for p in [(0, 0), (1, 0), (5, -2)] {
            let (pos, tile) = grass(p);
            map.insert(pos, tile);
        }
        assert_eq!(map.len(), 3);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.bounds(), None);
    }

    #[test]
    fn test_bounds_cover_negative_coordinates() {
        let mut map = TileMap::default();
        for p in [(-4, 7), (2, -3), (0, 0)] {
            let (pos, tile) = grass(p);
            map.insert(pos, tile);
        }
        let (min, max) = map.bounds().unwrap();
        assert_eq!(min, GridPos::new(-4, -3));
        assert_eq!(max, GridPos::new(2, 7));
    }

    #[test]
    fn test_exclusive_highlight_moves() {
        let mut map = TileMap::default();
        let (a, tile_a) = grass((0, 0));
        let (b, tile_b) = grass((1, 1));
        map.insert(a, tile_a);
        map.insert(b, tile_b);

        map.set_exclusive_highlight(Some(a));
        assert!(map.get(a).unwrap().highlighted);
        map.set_exclusive_highlight(Some(b));
        assert!(!map.get(a).unwrap().highlighted);
        assert!(map.get(b).unwrap().highlighted);
        map.set_exclusive_highlight(None);
        assert_eq!(map.highlighted_pos(), None);
    }

    #[test]
    fn test_selection_toggles_and_is_exclusive() {
        let mut map = TileMap::default();
        let (a, tile_a) = grass((0, 0));
        let (b, tile_b) = grass((1, 0));
        map.insert(a, tile_a);
        map.insert(b, tile_b);

        assert_eq!(map.toggle_exclusive_selection(a), Some(a));
        assert_eq!(map.toggle_exclusive_selection(b), Some(b));
        assert_eq!(map.selected_pos(), Some(b));
        // Clicking the selected tile again deselects.
        assert_eq!(map.toggle_exclusive_selection(b), None);
        assert_eq!(map.selected_pos(), None);
        // Selecting empty space is a no-op that clears selection.
        assert_eq!(map.toggle_exclusive_selection(GridPos::new(9, 9)), None);
    }
}
