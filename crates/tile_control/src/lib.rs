//! tile_control - runtime tile editing for grid maps
//!
//! Re-exports the workspace crates under one name:
//! - [`core`] - tile IDs, tile codes, tilesets, map grids
//! - [`autotile`] - autotile shaping and single-tile painting
//! - [`fill`] - filtered region fills with creep
//! - [`runtime`] - the editing session with linked maps and the change log (feature `runtime`)
//!
//! Most users only need the prelude:
//!
//! ```rust,ignore
//! use tile_control::prelude::*;
//!
//! let mut context = MapEditingContext::new(FileMapLoader::new("data"), tilesets);
//! context.setup_map(1)?;
//! context.set_tile(5, 5, 0, "A0,0", PaintOptions::default());
//! ```

pub use tile_control_autotile as autotile;
pub use tile_control_core as core;
pub use tile_control_fill as fill;
#[cfg(feature = "runtime")]
pub use tile_control_runtime as runtime;

pub mod prelude;
