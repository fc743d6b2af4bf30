//! Autotile shaping for the fixed host tile format
//!
//! Autotiles (sheets A1-A4) come in families of 48 tile IDs. Which ID a cell
//! shows depends on whether its neighbours belong to the same family:
//! - Standard families choose among 47 corner/edge shapes
//! - Building families (roofs, walls) choose among 16 shapes from the 4 sides
//! - Waterfall families choose among 4 shapes from east and west
//!
//! # Example
//!
//! ```rust,ignore
//! use tile_control_autotile::{paint_tile, PaintOptions};
//! use tile_control_core::MapData;
//!
//! let mut map = MapData::new(8, 8, 1);
//! paint_tile(&mut map, 5, 5, 0, 2048, PaintOptions::default());
//! assert_eq!(map.tile_id(5, 5, 0), 2048 + 46); // isolated ocean
//! ```

pub mod family;
pub mod paint;
pub mod shape;

pub use family::AutotileFamily;
pub use paint::{
    neighbor_mask, paint_tile, reshape_cell, reshape_neighbors, shape_at, shape_autotile,
    PaintOptions,
};
pub use shape::{
    building_shape, calculate_bitmask, neighbors, shape_for, standard_shape, waterfall_shape,
};
