//! Per-map record of tile edits
//!
//! Every accepted write is stored as `map ID -> flat index -> tile ID`. The log
//! is replayed onto a map whenever its data is freshly loaded, and the whole log
//! travels inside save data under [`SAVE_KEY`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tile_control_core::{MapData, TileId};
use tracing::{debug, warn};

/// Field of the save payload that holds the change log
pub const SAVE_KEY: &str = "tileChanges";

/// Overridden tiles of every edited map.
///
/// Serializes as `{ "<mapId>": { "<flatIndex>": tileId } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    maps: BTreeMap<i32, BTreeMap<usize, TileId>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write, replacing any earlier entry for the same index
    pub fn record(&mut self, map_id: i32, index: usize, tile_id: TileId) {
        self.maps.entry(map_id).or_default().insert(index, tile_id);
    }

    /// Recorded edits of one map
    pub fn changes_for(&self, map_id: i32) -> Option<&BTreeMap<usize, TileId>> {
        self.maps.get(&map_id)
    }

    /// Overlay the recorded edits of `map_id` onto freshly loaded data.
    /// Returns how many entries were applied.
    pub fn restore(&self, map_id: i32, map: &mut MapData) -> usize {
        let Some(changes) = self.maps.get(&map_id) else {
            return 0;
        };
        let applied = map.apply_overlay(changes);
        debug!("Replayed {} tile changes onto map {}", applied, map_id);
        applied
    }

    /// Forget every recorded edit
    pub fn clear(&mut self) {
        self.maps.clear();
    }

    /// Number of maps with at least one recorded edit
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Total number of recorded edits across all maps
    pub fn len(&self) -> usize {
        self.maps.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.values().all(BTreeMap::is_empty)
    }

    /// Write the log into a save payload object
    pub fn embed(&self, contents: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
        contents.insert(SAVE_KEY.to_string(), serde_json::to_value(self)?);
        Ok(())
    }

    /// Read the log from a save payload.
    ///
    /// Saves written without the field yield an empty log. A field that cannot
    /// be read is logged and also yields an empty log.
    pub fn extract(contents: &Value) -> Self {
        let Some(value) = contents.get(SAVE_KEY) else {
            debug!("Save data has no {} field, starting with an empty change log", SAVE_KEY);
            return Self::default();
        };
        match Self::deserialize(value) {
            Ok(log) => log,
            Err(e) => {
                warn!("Could not read {} from save data: {}", SAVE_KEY, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_upserts() {
        let mut log = ChangeLog::new();
        log.record(1, 10, 2048);
        log.record(1, 10, 2096);
        log.record(2, 0, 5);
        assert_eq!(log.len(), 2);
        assert_eq!(log.map_count(), 2);
        assert_eq!(log.changes_for(1).unwrap()[&10], 2096);
        assert!(log.changes_for(3).is_none());
    }

    #[test]
    fn test_restore_overlays_only_that_map() {
        let mut log = ChangeLog::new();
        log.record(1, 3, 77);
        log.record(2, 4, 88);

        let mut map = MapData::new(2, 2, 1);
        assert_eq!(log.restore(1, &mut map), 1);
        assert_eq!(map.data[3], 77);
        assert_eq!(map.data[4], 0);
        assert_eq!(log.restore(5, &mut map), 0);
    }

    #[test]
    fn test_save_payload_layout() {
        let mut log = ChangeLog::new();
        log.record(3, 12, 2048);

        let mut contents = Map::new();
        contents.insert("party".to_string(), json!({}));
        log.embed(&mut contents).unwrap();

        let value = Value::Object(contents);
        assert_eq!(value[SAVE_KEY], json!({ "3": { "12": 2048 } }));
        assert_eq!(ChangeLog::extract(&value), log);
    }

    #[test]
    fn test_extract_defaults_to_empty() {
        assert!(ChangeLog::extract(&json!({ "party": {} })).is_empty());
        assert!(ChangeLog::extract(&json!({ SAVE_KEY: "garbage" })).is_empty());
    }
}
