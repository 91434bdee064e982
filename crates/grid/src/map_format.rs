//! Map document: the transient on-disk representation of a tile map.
//!
//! JSON layout:
//!
//! ```json
//! {
//!   "dimensions": { "width": 8, "height": 8 },
//!   "tiles": [
//!     { "position": { "x": 0, "y": 0 }, "type": "grass", "height": 0.5,
//!       "resources": ["tree"], "entities": [], "navigation": { "walk": true } }
//!   ]
//! }
//! ```
//!
//! The CSV variant carries one tile type per cell and no metadata:
//! row index = grid y, column index = grid x, empty cells produce no tile.
//!
//! A document is built by the parser, applied to the [`TileMap`] once, then
//! dropped; it is never kept alive as a second source of truth.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::coords::GridPos;
use crate::map_io::MapError;
use crate::tile::TileRecord;
use crate::tile_map::TileMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapTile {
    pub position: GridPos,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub resources: BTreeSet<String>,
    #[serde(default)]
    pub entities: BTreeSet<String>,
    #[serde(default)]
    pub navigation: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDocument {
    pub dimensions: MapDimensions,
    pub tiles: Vec<MapTile>,
}

/// CSV cells that deliberately carry no tile.
fn is_empty_cell(cell: &str) -> bool {
    cell.is_empty() || cell.eq_ignore_ascii_case("empty")
}

impl MapDocument {
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the CSV variant. Dimensions are inferred from the cell counts;
    /// ragged rows are rejected rather than silently padded.
    pub fn from_csv(text: &str) -> Result<Self, MapError> {
        let mut tiles = Vec::new();
        let mut width: Option<usize> = None;
        let mut rows = 0usize;

        for (y, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            match width {
                None => width = Some(cells.len()),
                Some(w) if w != cells.len() => {
                    return Err(MapError::Csv {
                        line: y + 1,
                        reason: format!("expected {w} cells, found {}", cells.len()),
                    });
                }
                Some(_) => {}
            }
            for (x, cell) in cells.iter().enumerate() {
                if is_empty_cell(cell) {
                    continue;
                }
                tiles.push(MapTile {
                    position: GridPos::new(x as i32, y as i32),
                    kind: (*cell).to_string(),
                    height: 0.0,
                    resources: BTreeSet::new(),
                    entities: BTreeSet::new(),
                    navigation: BTreeMap::new(),
                });
            }
            rows = y + 1;
        }

        Ok(Self {
            dimensions: MapDimensions {
                width: width.unwrap_or(0) as u32,
                height: rows as u32,
            },
            tiles,
        })
    }

    /// Serialize as the CSV variant. The grid starts at the origin and grows
    /// past the declared dimensions to cover every tile, so nothing placed
    /// out of bounds is lost. Tiles at negative coordinates have no CSV cell
    /// at all; [`MapDocument::csv_dropped`] counts them so callers can warn.
    /// Metadata (height, resources, entities, navigation) never survives CSV.
    pub fn to_csv(&self) -> String {
        let mut width = self.dimensions.width as i32;
        let mut height = self.dimensions.height as i32;
        for tile in &self.tiles {
            width = width.max(tile.position.x + 1);
            height = height.max(tile.position.y + 1);
        }
        let by_pos: BTreeMap<GridPos, &str> = self
            .tiles
            .iter()
            .map(|t| (t.position, t.kind.as_str()))
            .collect();

        let mut out = String::new();
        for y in 0..height {
            let row: Vec<&str> = (0..width)
                .map(|x| by_pos.get(&GridPos::new(x, y)).copied().unwrap_or(""))
                .collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// How many tiles [`MapDocument::to_csv`] would drop: anything at a
    /// negative coordinate, which the row/column layout cannot address.
    pub fn csv_dropped(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.position.x < 0 || t.position.y < 0)
            .count()
    }

    /// Snapshot a live map. Tiles are emitted in grid-position order so the
    /// output is deterministic.
    pub fn from_map(map: &TileMap) -> Self {
        let mut tiles: Vec<MapTile> = map
            .iter()
            .map(|(position, tile)| MapTile {
                position,
                kind: tile.kind.clone(),
                height: tile.height,
                resources: tile.resources.clone(),
                entities: tile.entities.clone(),
                navigation: tile.navigation.clone(),
            })
            .collect();
        tiles.sort_by_key(|t| t.position);
        Self {
            dimensions: MapDimensions {
                width: map.dimensions.0,
                height: map.dimensions.1,
            },
            tiles,
        }
    }

    /// Consume the document into a fresh store. Later entries win when the
    /// document repeats a position; negative heights are clamped on entry.
    pub fn into_map(self) -> TileMap {
        let mut map = TileMap::new((self.dimensions.width, self.dimensions.height));
        for doc_tile in self.tiles {
            let mut tile = TileRecord::new(doc_tile.kind, doc_tile.height);
            tile.resources = doc_tile.resources;
            tile.entities = doc_tile.entities;
            tile.navigation = doc_tile.navigation;
            map.insert(doc_tile.position, tile);
        }
        map
    }
}
