//! Runtime map editing for tile_control
//!
//! This crate ties the grid, autotile and fill engines to a play session:
//! - [`MapEditingContext`] - active map, linked map, session cache and refresh flag
//! - [`TileEditor`] - the checked write path (sheet presence, change logging)
//! - [`ChangeLog`] - per-map edit record replayed on load and stored in saves
//! - [`MapLoader`] implementations for `MapNNN.json` files and in-memory maps
//! - Tile queries and coordinate resolution for event conditions
//!
//! # Features
//!
//! - `bevy`: [`TileControlPlugin`] and the [`TilemapRefreshRequested`] message
//!
//! # Example
//!
//! ```rust,ignore
//! use tile_control_runtime::{FileMapLoader, MapEditingContext};
//! use tile_control_core::TilesetRegistry;
//! use tile_control_fill::{AreaFilter, FillRequest};
//!
//! let tilesets = TilesetRegistry::from_json(&std::fs::read_to_string("data/Tilesets.json")?)?;
//! let mut context = MapEditingContext::new(FileMapLoader::new("data"), tilesets);
//! context.setup_map(1)?;
//!
//! let request = FillRequest::new(5, 5, 0, "A0,0").with_area(AreaFilter::new(-1, -1, 1, 1));
//! let report = context.fill_tiles(&request);
//! ```

mod change_log;
mod context;
mod editor;
mod error;
mod loader;
#[cfg(feature = "bevy")]
mod plugin;
mod position;
mod query;

pub use change_log::{ChangeLog, SAVE_KEY};
pub use context::MapEditingContext;
pub use editor::TileEditor;
pub use error::TileControlError;
pub use loader::{
    load_map_from_bytes, load_map_from_str, map_file_name, FileMapLoader, MapLoadError, MapLoader,
    MemoryMapLoader,
};
#[cfg(feature = "bevy")]
pub use plugin::{TileControlPlugin, TilemapRefreshRequested};
pub use position::{
    orientational_shift, position_ahead, ActorPose, Anchor, Direction, PoseProvider, Relativity,
};
pub use query::{CellReport, LayerReport};
