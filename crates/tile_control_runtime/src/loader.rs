//! Map loading for editing sessions
//!
//! Maps are stored in the host's `MapNNN.json` layout: a JSON object with
//! `width`, `height`, `tilesetId` and a flat `data` array covering four tile
//! layers plus the shadow and region channels. Other host fields (events,
//! encounters, ...) are ignored.
//!
//! # Example
//!
//! ```rust,ignore
//! use tile_control_runtime::{FileMapLoader, MapLoader};
//!
//! let loader = FileMapLoader::new("data");
//! let map = loader.load_map(3)?; // reads data/Map003.json
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tile_control_core::MapData;
use tracing::debug;

/// Error type for map loading failures
#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid map format: {0}")]
    InvalidFormat(String),
    #[error("Map {0} does not exist")]
    NotFound(i32),
}

/// Source of raw map data, keyed by host map ID
pub trait MapLoader: Send + Sync {
    fn load_map(&self, map_id: i32) -> Result<MapData, MapLoadError>;
}

/// Reads `MapNNN.json` files from a data directory
#[derive(Debug, Clone)]
pub struct FileMapLoader {
    data_dir: PathBuf,
}

impl FileMapLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding a map, e.g. `data/Map007.json`
    pub fn map_path(&self, map_id: i32) -> PathBuf {
        self.data_dir.join(map_file_name(map_id))
    }
}

impl MapLoader for FileMapLoader {
    fn load_map(&self, map_id: i32) -> Result<MapData, MapLoadError> {
        let path = self.map_path(map_id);
        if !path.is_file() {
            return Err(MapLoadError::NotFound(map_id));
        }
        debug!("Loading map {} from {}", map_id, path.display());
        let bytes = std::fs::read(&path)?;
        load_map_from_bytes(&bytes)
    }
}

/// Holds maps in memory. Used for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryMapLoader {
    maps: HashMap<i32, MapData>,
}

impl MemoryMapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a map
    pub fn insert(&mut self, map_id: i32, map: MapData) {
        self.maps.insert(map_id, map);
    }

    /// Builder-style insert
    pub fn with_map(mut self, map_id: i32, map: MapData) -> Self {
        self.insert(map_id, map);
        self
    }
}

impl MapLoader for MemoryMapLoader {
    fn load_map(&self, map_id: i32) -> Result<MapData, MapLoadError> {
        self.maps
            .get(&map_id)
            .cloned()
            .ok_or(MapLoadError::NotFound(map_id))
    }
}

/// File name the host uses for a map: `Map` plus the ID zero-padded to 3 digits
pub fn map_file_name(map_id: i32) -> String {
    format!("Map{:03}.json", map_id)
}

/// Load a map from a JSON string
pub fn load_map_from_str(json: &str) -> Result<MapData, MapLoadError> {
    load_map_from_bytes(json.as_bytes())
}

/// Load a map from bytes, checking the data array against the dimensions
pub fn load_map_from_bytes(bytes: &[u8]) -> Result<MapData, MapLoadError> {
    let map: MapData = serde_json::from_slice(bytes)?;
    map.validate().map_err(MapLoadError::InvalidFormat)?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_file_name_is_zero_padded() {
        assert_eq!(map_file_name(3), "Map003.json");
        assert_eq!(map_file_name(42), "Map042.json");
        assert_eq!(map_file_name(1234), "Map1234.json");
    }

    #[test]
    fn test_load_host_map_json() {
        let json = r#"{
            "autoplayBgm": false,
            "displayName": "Harbor",
            "width": 2,
            "height": 1,
            "tilesetId": 4,
            "data": [2048, 2096, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0],
            "events": [null]
        }"#;
        let map = load_map_from_str(json).unwrap();
        assert_eq!((map.width, map.height, map.tileset_id), (2, 1, 4));
        assert_eq!(map.tile_id(1, 0, 0), 2096);
        assert_eq!(map.region_id(0, 0), 5);
    }

    #[test]
    fn test_load_rejects_short_data() {
        let json = r#"{ "width": 2, "height": 2, "tilesetId": 1, "data": [0, 0, 0] }"#;
        assert!(matches!(
            load_map_from_str(json),
            Err(MapLoadError::InvalidFormat(_))
        ));
        assert!(matches!(load_map_from_str("{"), Err(MapLoadError::Json(_))));
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryMapLoader::new().with_map(2, MapData::new(3, 3, 1));
        assert_eq!(loader.load_map(2).unwrap().width, 3);
        assert!(matches!(loader.load_map(9), Err(MapLoadError::NotFound(9))));
    }
}
