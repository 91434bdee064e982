//! Map file loading and saving.
//!
//! Free functions return typed [`MapError`]s and are the library surface;
//! the Bevy event handlers at the bottom apply the best-effort policy: a
//! failed load logs the error and leaves an empty map, a failed save logs
//! and leaves the file untouched. No retry, no partial recovery.

use bevy::prelude::*;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::map_format::MapDocument;
use crate::tile_map::TileMap;

/// Errors from map parsing and file I/O.
#[derive(Debug)]
pub enum MapError {
    /// File not found, permission denied, disk full, and friends.
    Io(std::io::Error),
    /// Malformed JSON or a document that does not match the map schema.
    Json(serde_json::Error),
    /// Malformed CSV (currently only ragged rows).
    Csv { line: usize, reason: String },
    /// File extension is neither `.json` nor `.csv`.
    UnknownFormat(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "I/O error: {e}"),
            MapError::Json(e) => write!(f, "JSON error: {e}"),
            MapError::Csv { line, reason } => write!(f, "CSV error on line {line}: {reason}"),
            MapError::UnknownFormat(ext) => {
                write!(f, "Unknown map format {ext:?} (expected .json or .csv)")
            }
        }
    }
}

impl std::error::Error for MapError {}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Json(e)
    }
}

fn extension_of(path: &Path) -> Result<String, MapError> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| MapError::UnknownFormat(path.display().to_string()))
}

/// Load a map document, dispatching on the file extension.
pub fn load_map_file(path: &Path) -> Result<MapDocument, MapError> {
    let text = fs::read_to_string(path)?;
    match extension_of(path)?.as_str() {
        "json" => MapDocument::from_json(&text),
        "csv" => MapDocument::from_csv(&text),
        other => Err(MapError::UnknownFormat(other.to_string())),
    }
}

/// Save a map document, dispatching on the file extension.
///
/// Uses the write-rename pattern: data goes to `{path}.tmp`, is flushed,
/// then renamed over the final path, so a crash mid-write cannot corrupt an
/// existing map file.
pub fn save_map_file(path: &Path, doc: &MapDocument) -> Result<(), MapError> {
    let data = match extension_of(path)?.as_str() {
        "json" => doc.to_json()?,
        "csv" => {
            let dropped = doc.csv_dropped();
            if dropped > 0 {
                warn!(
                    "csv cannot address negative coordinates; {dropped} tile(s) left out of {}",
                    path.display()
                );
            }
            doc.to_csv()
        }
        other => return Err(MapError::UnknownFormat(other.to_string())),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = path.with_extension("tmp");
    let mut file = File::create(&tmp_path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Request loading a map file into the live [`TileMap`].
#[derive(Event, Debug, Clone)]
pub struct LoadMapEvent(pub PathBuf);

/// Request saving the live [`TileMap`] to a file.
#[derive(Event, Debug, Clone)]
pub struct SaveMapEvent(pub PathBuf);

pub fn handle_load_map_events(
    mut events: EventReader<LoadMapEvent>,
    mut map: ResMut<TileMap>,
) {
    for LoadMapEvent(path) in events.read() {
        match load_map_file(path) {
            Ok(doc) => {
                let loaded = doc.into_map();
                info!(
                    "Loaded map {:?}: {} tiles, {}x{}",
                    path,
                    loaded.len(),
                    loaded.dimensions.0,
                    loaded.dimensions.1
                );
                *map = loaded;
            }
            Err(e) => {
                error!("Failed to load map {:?}: {e}", path);
                *map = TileMap::default();
            }
        }
    }
}

pub fn handle_save_map_events(mut events: EventReader<SaveMapEvent>, map: Res<TileMap>) {
    for SaveMapEvent(path) in events.read() {
        let doc = MapDocument::from_map(&map);
        match save_map_file(path, &doc) {
            Ok(()) => info!("Saved map {:?}: {} tiles", path, doc.tiles.len()),
            Err(e) => error!("Failed to save map {:?}: {e}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::GridPos;
    use crate::tile::TileRecord;

    fn sample_map() -> TileMap {
        let mut map = TileMap::new((4, 4));
        let mut grass = TileRecord::new("grass", 1.25);
        grass.resources.insert("tree".to_string());
        grass.navigation.insert("walk".to_string(), true);
        map.insert(GridPos::new(0, 0), grass);
        map.insert(GridPos::new(3, 2), TileRecord::new("water", 0.0));
        map
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let original = sample_map();

        save_map_file(&path, &MapDocument::from_map(&original)).unwrap();
        let reloaded = load_map_file(&path).unwrap().into_map();

        assert_eq!(reloaded.len(), original.len());
        for (pos, tile) in original.iter() {
            assert!(reloaded.get(pos).unwrap().same_content(tile));
        }
        // No stray temp file left behind.
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_csv_file_roundtrip_drops_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.csv");
        let original = sample_map();

        save_map_file(&path, &MapDocument::from_map(&original)).unwrap();
        let reloaded = load_map_file(&path).unwrap().into_map();

        assert_eq!(reloaded.len(), original.len());
        let grass = reloaded.get(GridPos::new(0, 0)).unwrap();
        assert_eq!(grass.kind, "grass");
        assert_eq!(grass.height, 0.0);
        assert!(grass.resources.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_map_file(Path::new("/nonexistent/map.json")).unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.toml");
        fs::write(&path, "x = 1").unwrap();
        let err = load_map_file(&path).unwrap_err();
        assert!(matches!(err, MapError::UnknownFormat(_)));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        fs::write(&path, "{ broken").unwrap();
        let err = load_map_file(&path).unwrap_err();
        assert!(matches!(err, MapError::Json(_)));
    }
}
