use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One addressable cell of the logical grid.
///
/// Tile kinds are free-form string tags so map files stay data-driven; the
/// renderer falls back to a default material for kinds it has no entry for.
/// Ordered collections keep serialization deterministic, which the map
/// round-trip property depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub kind: String,
    pub height: f32,
    pub resources: BTreeSet<String>,
    pub entities: BTreeSet<String>,
    /// Travel mode -> passable. Modes absent from the map count as impassable.
    pub navigation: BTreeMap<String, bool>,
    #[serde(skip)]
    pub highlighted: bool,
    #[serde(skip)]
    pub selected: bool,
}

impl TileRecord {
    pub fn new(kind: impl Into<String>, height: f32) -> Self {
        Self {
            kind: kind.into(),
            height: height.max(0.0),
            resources: BTreeSet::new(),
            entities: BTreeSet::new(),
            navigation: BTreeMap::new(),
            highlighted: false,
            selected: false,
        }
    }

    pub fn is_passable(&self, mode: &str) -> bool {
        self.navigation.get(mode).copied().unwrap_or(false)
    }

    /// Logical equality ignoring the runtime highlight/selection flags.
    /// Used by the persistence round-trip tests and the map differ.
    pub fn same_content(&self, other: &Self) -> bool {
        self.kind == other.kind
            && (self.height - other.height).abs() < f32::EPSILON
            && self.resources == other.resources
            && self.entities == other.entities
            && self.navigation == other.navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_negative_height() {
        assert_eq!(TileRecord::new("grass", -3.0).height, 0.0);
    }

    #[test]
    fn test_unlisted_travel_mode_is_impassable() {
        let mut tile = TileRecord::new("water", 0.0);
        tile.navigation.insert("boat".to_string(), true);
        assert!(tile.is_passable("boat"));
        assert!(!tile.is_passable("walk"));
    }

    #[test]
    fn test_same_content_ignores_runtime_flags() {
        let a = TileRecord::new("grass", 1.0);
        let mut b = a.clone();
        b.selected = true;
        b.highlighted = true;
        assert!(a.same_content(&b));
        b.kind = "rock".to_string();
        assert!(!a.same_content(&b));
    }
}
