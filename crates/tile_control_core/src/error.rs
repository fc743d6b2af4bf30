//! Error types for grid access

use thiserror::Error;

use crate::TileId;

/// Reasons a tile write was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("Tile ({x}, {y}, {z}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        z: usize,
        width: u32,
        height: u32,
    },
    #[error("Tile ID {tile_id} is on sheet {sheet}, which does not exist in tileset {tileset_id}")]
    UnresolvableSheet {
        tile_id: TileId,
        sheet: String,
        tileset_id: u32,
    },
}
