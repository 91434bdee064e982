//! ASCII rendering of the tile map for the debug log.
//!
//! Built on demand from `&TileMap` — no per-frame systems. One character per
//! cell over the occupied bounds, with row/column headers and a legend.

use crate::coords::GridPos;
use crate::tile::TileRecord;
use crate::tile_map::TileMap;

/// Glyph for a single tile. Selection wins over everything so the cursor's
/// target is easy to spot in a wall of terrain.
pub fn tile_to_char(tile: &TileRecord) -> char {
    if tile.selected {
        return '@';
    }
    if tile.highlighted {
        return '+';
    }
    if tile.resources.contains("tree") {
        return 'T';
    }
    if tile.resources.contains("ore") {
        return 'o';
    }
    match tile.kind.as_str() {
        "water" => '~',
        "sand" => ',',
        "grass" => '.',
        "rock" => '^',
        _ => '?',
    }
}

/// Largest bounding-box side the view will render. Two far-apart tiles span
/// an enormous rectangle of mostly empty cells; above this the dump is a
/// one-line summary instead.
const MAX_ASCII_EXTENT: i64 = 256;

/// Build the full-resolution ASCII view, cropped to the occupied bounds.
/// Empty cells inside the bounds render as a space.
pub fn build_ascii_map(map: &TileMap) -> String {
    let Some((min, max)) = map.bounds() else {
        return "(empty map)\n".to_string();
    };

    // i64: the bounds corners can sit anywhere in the i32 range.
    let span_x = max.x as i64 - min.x as i64 + 1;
    let span_y = max.y as i64 - min.y as i64 + 1;
    if span_x > MAX_ASCII_EXTENT || span_y > MAX_ASCII_EXTENT {
        return format!(
            "(map spans {span_x}x{span_y} cells, too large for ASCII view; limit {MAX_ASCII_EXTENT} per side. Tiles: {}  bounds: {min} .. {max})\n",
            map.len()
        );
    }

    let width = span_x as usize;
    let mut out = String::with_capacity((width + 8) * (span_y as usize + 2));

    out.push_str(&format!(
        "Tiles: {}  bounds: {min} .. {max}\n",
        map.len()
    ));

    // Column header: last digit of each x coordinate.
    out.push_str("     ");
    for x in min.x..=max.x {
        out.push(char::from_digit((x.rem_euclid(10)) as u32, 10).unwrap_or('?'));
    }
    out.push('\n');

    for y in min.y..=max.y {
        out.push_str(&format!("{y:>4} "));
        for x in min.x..=max.x {
            match map.get(GridPos::new(x, y)) {
                Some(tile) => out.push(tile_to_char(tile)),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }

    out.push_str("Legend: ~ water  , sand  . grass  ^ rock  T tree  o ore  + hover  @ selected\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map() {
        assert_eq!(build_ascii_map(&TileMap::default()), "(empty map)\n");
    }

    #[test]
    fn test_glyph_priority() {
        let mut tile = TileRecord::new("grass", 0.0);
        tile.resources.insert("tree".to_string());
        assert_eq!(tile_to_char(&tile), 'T');
        tile.highlighted = true;
        assert_eq!(tile_to_char(&tile), '+');
        tile.selected = true;
        assert_eq!(tile_to_char(&tile), '@');
    }

    #[test]
    fn test_sparse_cells_render_blank() {
        let mut map = TileMap::default();
        map.insert(GridPos::new(0, 0), TileRecord::new("grass", 0.0));
        map.insert(GridPos::new(2, 0), TileRecord::new("water", 0.0));
        let art = build_ascii_map(&map);
        let row = art.lines().find(|l| l.starts_with("   0 ")).unwrap();
        assert!(row.ends_with(". ~"));
    }

    #[test]
    fn test_oversized_extent_gets_summary_instead_of_grid() {
        let mut map = TileMap::default();
        map.insert(GridPos::new(0, 0), TileRecord::new("grass", 0.0));
        map.insert(GridPos::new(1_000_000, 0), TileRecord::new("grass", 0.0));
        let art = build_ascii_map(&map);
        assert!(art.contains("too large"));
        assert!(art.lines().count() == 1);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let mut map = TileMap::default();
        map.insert(GridPos::new(i32::MIN, 0), TileRecord::new("grass", 0.0));
        map.insert(GridPos::new(i32::MAX, 0), TileRecord::new("rock", 0.0));
        let art = build_ascii_map(&map);
        assert!(art.contains("too large"));
    }

    #[test]
    fn test_unknown_kind_has_fallback_glyph() {
        assert_eq!(tile_to_char(&TileRecord::new("lava", 0.0)), '?');
    }
}
