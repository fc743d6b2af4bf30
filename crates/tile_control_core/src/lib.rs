//! Core data structures for tile_control
//!
//! This crate provides the fundamental types for editing tile-based maps at runtime:
//! - `TileId` ranges and autotile family arithmetic
//! - Tile codes (`"A3,1"`, `"B12"`) and their conversion to tile IDs
//! - `TilesetConfig` - which tile sheets a tileset actually provides
//! - `MapData` - the raw 4-layer grid plus shadow and region channels
//! - `TileSource` / `TileSink` - read and checked-write access to a grid

mod code;
mod error;
mod grid;
pub mod lenient;
mod map;
mod tile_id;
mod tileset;

pub use code::{decode_tile_code, encode_tile_code, TileCodeError, TileRef, UNKNOWN_TILE_CODE};
pub use error::TileError;
pub use grid::{TileSink, TileSource};
pub use map::{MapData, CHANNEL_COUNT, LAYER_COUNT, REGION_LAYER, SHADOW_LAYER};
pub use tile_id::{
    autotile_base, autotile_kind, autotile_shape, is_tile_match, TileId, AUTOTILE_STRIDE,
    EMPTY_TILE, TILE_ID_A1, TILE_ID_A2, TILE_ID_A3, TILE_ID_A4, TILE_ID_A5, TILE_ID_B, TILE_ID_C,
    TILE_ID_D, TILE_ID_E, TILE_ID_MAX,
};
pub use tileset::{TileSheet, TilesetConfig, TilesetRegistry};
