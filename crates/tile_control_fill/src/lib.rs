//! Region-selection fills for tile_control.
//!
//! The primary entry point is [`fill_tiles`], which runs a [`FillRequest`]
//! against any [`TileSink`](tile_control_core::TileSink). A fill starts from
//! every cell of the map and narrows it in a fixed order:
//! region, tile ID, area, distance, hollow, origin.
//! The survivors are painted, then [`CreepSettings`] can spread a second tile
//! into the cells around them.
//!
//! This crate has no Bevy dependency. It operates on plain data from `tile_control_core`.

mod apply;
pub mod filters;
mod selection;
mod types;

pub use apply::{fill_tiles, select_creep_tiles, select_fill_tiles, FillReport};
pub use selection::TileSelection;
pub use types::{
    AreaFilter, CreepSettings, FillFilters, FillRequest, LayerSelection, LayerUse, OriginFilter,
    TileFilters,
};
