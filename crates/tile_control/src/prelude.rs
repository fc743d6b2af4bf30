pub use tile_control_autotile::{paint_tile, AutotileFamily, PaintOptions};
pub use tile_control_core::{
    decode_tile_code, encode_tile_code, is_tile_match, MapData, TileError, TileId, TileRef,
    TileSheet, TileSink, TileSource, TilesetConfig, TilesetRegistry,
};
pub use tile_control_fill::{
    fill_tiles, AreaFilter, CreepSettings, FillReport, FillRequest, LayerSelection, OriginFilter,
    TileFilters, TileSelection,
};

#[cfg(feature = "runtime")]
pub use tile_control_runtime::{
    ActorPose, Anchor, ChangeLog, Direction, FileMapLoader, MapEditingContext, MapLoader,
    MemoryMapLoader, Relativity, TileControlError,
};

#[cfg(feature = "bevy")]
pub use tile_control_runtime::{TileControlPlugin, TilemapRefreshRequested};
