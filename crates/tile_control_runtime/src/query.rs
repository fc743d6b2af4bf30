//! Read-only questions about the editing map, for use in event conditions

use std::fmt;

use tile_control_core::{
    autotile_kind, decode_tile_code, encode_tile_code, TileId, TileRef, LAYER_COUNT,
};
use tracing::{info, warn};

use crate::context::MapEditingContext;
use crate::position::{position_ahead, ActorPose};

/// One visual layer of a [`CellReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerReport {
    pub tile_id: TileId,
    pub autotile_kind: Option<u32>,
    pub code: String,
}

/// Everything stored at one cell of the editing map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellReport {
    pub map_id: i32,
    pub x: i32,
    pub y: i32,
    pub layers: Vec<LayerReport>,
    pub shadow_bits: u32,
    pub region_id: u32,
}

impl fmt::Display for CellReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile info at ({},{}) on map {}:", self.x, self.y, self.map_id)?;
        for (z, layer) in self.layers.iter().enumerate() {
            let kind = layer
                .autotile_kind
                .map_or_else(|| "-".to_string(), |kind| kind.to_string());
            writeln!(
                f,
                "  Tile {} {} {} tileId {} Autotile Type {} Code {}",
                self.x, self.y, z, layer.tile_id, kind, layer.code
            )?;
        }
        writeln!(f, "Shadow Bits: {} (0b{:b})", self.shadow_bits, self.shadow_bits)?;
        write!(f, "Tile Region: {}", self.region_id)
    }
}

impl MapEditingContext {
    /// Tile code of a cell, e.g. `"A1,0"`
    pub fn tile_code_at(&self, x: i32, y: i32, z: usize) -> String {
        encode_tile_code(self.tile_id(x, y, z))
    }

    /// Whether the tile at a cell is exactly one of `list`.
    /// Entries are tile IDs or tile codes; malformed codes never match.
    pub fn tile_in_list(&self, list: &[TileRef], x: i32, y: i32, z: usize) -> bool {
        let tile_id = self.tile_id(x, y, z);
        list.iter().any(|entry| match entry.try_resolve() {
            Ok(wanted) => wanted == tile_id,
            Err(e) => {
                warn!("Skipping tile list entry {}: {}", entry, e);
                false
            }
        })
    }

    /// Whether the tile at a cell belongs to one of the autotile families in `list`.
    ///
    /// Numeric entries are family indices; tile codes stand for the family of
    /// the tile they name. Cells without an autotile never match.
    pub fn autotile_in_list(&self, list: &[TileRef], x: i32, y: i32, z: usize) -> bool {
        let Some(kind) = autotile_kind(self.tile_id(x, y, z)) else {
            return false;
        };
        list.iter().any(|entry| match entry {
            TileRef::Id(wanted) => *wanted == kind,
            TileRef::Code(code) => match decode_tile_code(code) {
                Ok(tile_id) => autotile_kind(tile_id) == Some(kind),
                Err(e) => {
                    warn!("Skipping autotile list entry {}: {}", code, e);
                    false
                }
            },
        })
    }

    /// [`tile_in_list`](Self::tile_in_list) at the cell `distance` steps in front of `pose`
    pub fn tile_ahead(&self, list: &[TileRef], pose: ActorPose, distance: u32, z: usize) -> bool {
        let (x, y) = position_ahead(pose, distance);
        self.tile_in_list(list, x, y, z)
    }

    /// [`autotile_in_list`](Self::autotile_in_list) at the cell `distance` steps in front of `pose`
    pub fn autotile_ahead(&self, list: &[TileRef], pose: ActorPose, distance: u32, z: usize) -> bool {
        let (x, y) = position_ahead(pose, distance);
        self.autotile_in_list(list, x, y, z)
    }

    /// Region tag of a cell; 0 when untagged or off the map
    pub fn region_id(&self, x: i32, y: i32) -> u32 {
        self.editing_map().map_or(0, |map| map.region_id(x, y))
    }

    /// Shadow mask of a cell; 0 off the map
    pub fn shadow_bits(&self, x: i32, y: i32) -> u32 {
        self.editing_map().map_or(0, |map| map.shadow_bits(x, y))
    }

    /// Collect the tile, family and code of every layer at a cell
    pub fn describe_cell(&self, x: i32, y: i32) -> CellReport {
        let layers = (0..LAYER_COUNT)
            .map(|z| {
                let tile_id = self.tile_id(x, y, z);
                LayerReport {
                    tile_id,
                    autotile_kind: autotile_kind(tile_id),
                    code: encode_tile_code(tile_id),
                }
            })
            .collect();
        CellReport {
            map_id: self.editing_map_id(),
            x,
            y,
            layers,
            shadow_bits: self.shadow_bits(x, y),
            region_id: self.region_id(x, y),
        }
    }

    /// Log [`describe_cell`](Self::describe_cell) at info level
    pub fn log_cell(&self, x: i32, y: i32) -> CellReport {
        let report = self.describe_cell(x, y);
        info!("{}", report);
        report
    }
}
