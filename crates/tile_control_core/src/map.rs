//! Raw map grid: four tile layers plus shadow and region channels

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::tile_id::{TileId, EMPTY_TILE};

/// Number of visual tile layers (z = 0..4)
pub const LAYER_COUNT: usize = 4;
/// Channel holding the 4-bit shadow mask of each cell
pub const SHADOW_LAYER: usize = 4;
/// Channel holding the region tag of each cell (0 = untagged)
pub const REGION_LAYER: usize = 5;
/// Total channels stored per cell
pub const CHANNEL_COUNT: usize = 6;

/// The authoritative tile array of one map.
///
/// `data` is laid out channel-major: the flat index of `(x, y, z)` is
/// `(z * height + y) * width + x`. Field names follow the host's map files,
/// so a `MapNNN.json` document deserializes directly (other fields are ignored).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub tileset_id: u32,
    pub data: Vec<TileId>,
}

impl MapData {
    /// Create a blank map with every channel zeroed
    pub fn new(width: u32, height: u32, tileset_id: u32) -> Self {
        let len = width as usize * height as usize * CHANNEL_COUNT;
        Self {
            width,
            height,
            tileset_id,
            data: vec![EMPTY_TILE; len],
        }
    }

    /// Number of cells in one layer
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if a coordinate lies on the map
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Flat index of a cell channel, or `None` outside the grid
    pub fn index(&self, x: i32, y: i32, z: usize) -> Option<usize> {
        if !self.in_bounds(x, y) || z >= CHANNEL_COUNT {
            return None;
        }
        let (width, height) = (self.width as usize, self.height as usize);
        Some((z * height + y as usize) * width + x as usize)
    }

    /// Tile at a cell channel; 0 outside the grid
    pub fn tile_id(&self, x: i32, y: i32, z: usize) -> TileId {
        self.index(x, y, z)
            .and_then(|index| self.data.get(index).copied())
            .unwrap_or(EMPTY_TILE)
    }

    /// Region tag of a cell; 0 when untagged or outside the grid
    pub fn region_id(&self, x: i32, y: i32) -> u32 {
        self.tile_id(x, y, REGION_LAYER)
    }

    /// Shadow mask of a cell; 0 outside the grid
    pub fn shadow_bits(&self, x: i32, y: i32) -> u32 {
        self.tile_id(x, y, SHADOW_LAYER)
    }

    /// Store a tile at a flat index. Returns false if the index is outside the data.
    pub fn set_index(&mut self, index: usize, tile_id: TileId) -> bool {
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = tile_id;
                true
            }
            None => false,
        }
    }

    /// Apply a set of recorded edits, returning how many were applied.
    ///
    /// Entries past the end of the data (a log recorded against a map that has
    /// since shrunk) are skipped.
    pub fn apply_overlay(&mut self, overlay: &BTreeMap<usize, TileId>) -> usize {
        let mut applied = 0;
        for (&index, &tile_id) in overlay {
            if self.set_index(index, tile_id) {
                applied += 1;
            } else {
                warn!(
                    "Recorded tile change at index {} is outside the {}x{} map",
                    index, self.width, self.height
                );
            }
        }
        applied
    }

    /// Check that the data array matches the map dimensions
    pub fn validate(&self) -> Result<(), String> {
        let expected = self.cell_count() * CHANNEL_COUNT;
        if self.data.len() != expected {
            return Err(format!(
                "map data has {} entries, expected {} for a {}x{} map",
                self.data.len(),
                expected,
                self.width,
                self.height
            ));
        }
        Ok(())
    }
}
