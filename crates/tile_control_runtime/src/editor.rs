//! Checked, logged write access to the map being edited

use tile_control_core::{
    MapData, TileError, TileSheet, TileSink, TileSource, TilesetConfig, TileId, EMPTY_TILE,
    LAYER_COUNT,
};
use tracing::warn;

use crate::change_log::ChangeLog;

/// A grid that refuses tiles the map's tileset cannot draw and records every
/// accepted write in the change log.
///
/// Obtained from [`MapEditingContext::editor`](crate::MapEditingContext::editor).
/// Edits of the active map also raise the tilemap refresh flag; edits of a
/// linked map do not, since nothing on screen shows it.
pub struct TileEditor<'a> {
    map_id: i32,
    map: &'a mut MapData,
    tileset: Option<&'a TilesetConfig>,
    changes: &'a mut ChangeLog,
    refresh: Option<&'a mut bool>,
}

impl<'a> TileEditor<'a> {
    pub fn new(
        map_id: i32,
        map: &'a mut MapData,
        tileset: Option<&'a TilesetConfig>,
        changes: &'a mut ChangeLog,
        refresh: Option<&'a mut bool>,
    ) -> Self {
        Self {
            map_id,
            map,
            tileset,
            changes,
            refresh,
        }
    }

    pub fn map_id(&self) -> i32 {
        self.map_id
    }

    pub fn map(&self) -> &MapData {
        self.map
    }

    /// Check that the tileset provides the sheet a tile is drawn from.
    ///
    /// Only visual layers are checked; the shadow and region channels hold
    /// plain numbers. Without a tileset config only the tile ID range is checked.
    fn check_sheet(&self, z: usize, tile_id: TileId) -> Result<(), TileError> {
        if z >= LAYER_COUNT || tile_id == EMPTY_TILE {
            return Ok(());
        }
        let sheet = TileSheet::of(tile_id);
        let (tileset_id, present) = match self.tileset {
            Some(tileset) => (tileset.id, tileset.tile_id_exists(tile_id)),
            None => (self.map.tileset_id, sheet.is_some()),
        };
        if present {
            return Ok(());
        }

        let sheet = sheet.map_or_else(|| "?".to_string(), |sheet| sheet.to_string());
        warn!(
            "Tile ID {} is on Sheet {}, which does not exist in Tileset {}. Tile was not placed.",
            tile_id, sheet, tileset_id
        );
        Err(TileError::UnresolvableSheet {
            tile_id,
            sheet,
            tileset_id,
        })
    }
}

impl TileSource for TileEditor<'_> {
    fn width(&self) -> u32 {
        self.map.width
    }

    fn height(&self) -> u32 {
        self.map.height
    }

    fn tile_id(&self, x: i32, y: i32, z: usize) -> TileId {
        self.map.tile_id(x, y, z)
    }
}

impl TileSink for TileEditor<'_> {
    fn write_exact(&mut self, x: i32, y: i32, z: usize, tile_id: TileId) -> Result<(), TileError> {
        let out_of_bounds = TileError::OutOfBounds {
            x,
            y,
            z,
            width: self.map.width,
            height: self.map.height,
        };
        let Some(index) = self.map.index(x, y, z) else {
            return Err(out_of_bounds);
        };
        self.check_sheet(z, tile_id)?;

        // Unvalidated map data can be shorter than its dimensions claim
        if !self.map.set_index(index, tile_id) {
            return Err(out_of_bounds);
        }
        self.changes.record(self.map_id, index, tile_id);
        if let Some(refresh) = self.refresh.as_deref_mut() {
            *refresh = true;
        }
        Ok(())
    }
}
