//! The editing session: active map, linked map, change log

use std::collections::HashMap;

use serde_json::{Map, Value};
use tile_control_autotile::{paint_tile, PaintOptions};
use tile_control_core::{MapData, TileRef, TileId, TilesetConfig, TilesetRegistry, EMPTY_TILE};
use tile_control_fill::{fill_tiles, FillReport, FillRequest};
use tracing::{debug, info, warn};

use crate::change_log::ChangeLog;
use crate::editor::TileEditor;
use crate::error::TileControlError;
use crate::loader::MapLoader;

/// Everything needed to edit maps at runtime.
///
/// Holds the active map, at most one linked map that edits are redirected to,
/// a cache of maps loaded for linking, and the change log that makes edits
/// survive reloads and saves. Owned by the map-session controller and passed to
/// every operation; there is no global state.
///
/// # Example
///
/// ```rust,ignore
/// use tile_control_runtime::{FileMapLoader, MapEditingContext};
///
/// let mut context = MapEditingContext::new(FileMapLoader::new("data"), tilesets);
/// context.setup_map(1)?;
/// context.set_tile(5, 5, 0, "A1,0", PaintOptions::default());
///
/// context.link_map(4)?;
/// context.set_tile(2, 3, 1, "B12", PaintOptions::default()); // edits map 4
/// context.unlink_map();
/// ```
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct MapEditingContext {
    loader: Box<dyn MapLoader>,
    tilesets: TilesetRegistry,
    active_map_id: i32,
    active_map: Option<MapData>,
    linked_map_id: Option<i32>,
    map_cache: HashMap<i32, MapData>,
    change_log: ChangeLog,
    needs_refresh: bool,
}

impl MapEditingContext {
    /// Create a session with no active map
    pub fn new(loader: impl MapLoader + 'static, tilesets: TilesetRegistry) -> Self {
        Self {
            loader: Box::new(loader),
            tilesets,
            active_map_id: 0,
            active_map: None,
            linked_map_id: None,
            map_cache: HashMap::new(),
            change_log: ChangeLog::new(),
            needs_refresh: false,
        }
    }

    pub fn tilesets(&self) -> &TilesetRegistry {
        &self.tilesets
    }

    /// Replace the tileset configuration
    pub fn set_tilesets(&mut self, tilesets: TilesetRegistry) {
        self.tilesets = tilesets;
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    // ─── Session lifecycle ──────────────────────────────────────────────

    /// Start a new game: forget all edits, cached maps and the link
    pub fn new_game(&mut self) {
        self.change_log.clear();
        self.map_cache.clear();
        self.linked_map_id = None;
        debug!("Tile change log reset for a new game");
    }

    /// Load a map and make it the active map.
    ///
    /// Recorded edits are replayed onto the fresh data and any link is dropped.
    pub fn setup_map(&mut self, map_id: i32) -> Result<(), TileControlError> {
        let map = self
            .loader
            .load_map(map_id)
            .map_err(|source| TileControlError::MapLoad { map_id, source })?;
        self.setup_loaded_map(map_id, map);
        Ok(())
    }

    /// Make already-loaded map data the active map, replaying recorded edits onto it
    pub fn setup_loaded_map(&mut self, map_id: i32, mut map: MapData) {
        self.change_log.restore(map_id, &mut map);
        self.map_cache.remove(&map_id);
        self.active_map_id = map_id;
        self.active_map = Some(map);
        self.unlink_map();
        debug!("Map {} set up for editing", map_id);
    }

    pub fn active_map_id(&self) -> i32 {
        self.active_map_id
    }

    pub fn active_map(&self) -> Option<&MapData> {
        self.active_map.as_ref()
    }

    // ─── Linking ────────────────────────────────────────────────────────

    /// Redirect edits to another map.
    ///
    /// Linking the active map unlinks. Map IDs below 1 are refused. The target
    /// is loaded before the link is recorded, so a failed load leaves the
    /// previous link in place.
    pub fn link_map(&mut self, map_id: i32) -> Result<(), TileControlError> {
        if map_id == self.active_map_id {
            self.unlink_map();
            return Ok(());
        }
        if map_id <= 0 {
            return Err(TileControlError::InvalidLinkTarget(map_id));
        }
        self.cache_map(map_id)?;
        self.linked_map_id = Some(map_id);
        info!("Tile editing linked to map {}", map_id);
        Ok(())
    }

    /// Edit the active map again
    pub fn unlink_map(&mut self) {
        if let Some(map_id) = self.linked_map_id.take() {
            info!("Tile editing unlinked from map {}", map_id);
        }
    }

    pub fn is_editing_local(&self) -> bool {
        self.linked_map_id.is_none()
    }

    pub fn is_editing_remote(&self) -> bool {
        !self.is_editing_local()
    }

    pub fn linked_map_id(&self) -> Option<i32> {
        self.linked_map_id
    }

    /// The map edits go to: the linked map, else the active map (0 when there is none)
    pub fn editing_map_id(&self) -> i32 {
        self.linked_map_id.unwrap_or(self.active_map_id)
    }

    /// Data of the map edits go to
    pub fn editing_map(&self) -> Option<&MapData> {
        match self.linked_map_id {
            Some(map_id) => self.map_cache.get(&map_id),
            None => self.active_map.as_ref(),
        }
    }

    /// Data of any map: the active map, a cached map, or a fresh load with
    /// recorded edits replayed (which is then cached)
    pub fn reference_map(&mut self, map_id: i32) -> Result<&MapData, TileControlError> {
        if map_id != self.active_map_id || self.active_map.is_none() {
            self.cache_map(map_id)?;
        }
        match self.active_map.as_ref() {
            Some(map) if map_id == self.active_map_id => Ok(map),
            _ => self
                .map_cache
                .get(&map_id)
                .ok_or(TileControlError::InvalidLinkTarget(map_id)),
        }
    }

    fn cache_map(&mut self, map_id: i32) -> Result<(), TileControlError> {
        if self.map_cache.contains_key(&map_id) {
            return Ok(());
        }
        let mut map = self
            .loader
            .load_map(map_id)
            .map_err(|source| TileControlError::MapLoad { map_id, source })?;
        self.change_log.restore(map_id, &mut map);
        self.map_cache.insert(map_id, map);
        debug!("Map {} loaded into the edit cache", map_id);
        Ok(())
    }

    // ─── Editing ────────────────────────────────────────────────────────

    /// Checked write access to the editing map, or `None` when there is no map
    pub fn editor(&mut self) -> Option<TileEditor<'_>> {
        let (map_id, map, refresh) = match self.linked_map_id {
            Some(map_id) => (map_id, self.map_cache.get_mut(&map_id)?, None),
            None => (
                self.active_map_id,
                self.active_map.as_mut()?,
                Some(&mut self.needs_refresh),
            ),
        };
        let tileset: Option<&TilesetConfig> = self.tilesets.get(map.tileset_id);
        Some(TileEditor::new(
            map_id,
            map,
            tileset,
            &mut self.change_log,
            refresh,
        ))
    }

    /// Tile at a cell of the editing map; 0 off the map
    pub fn tile_id(&self, x: i32, y: i32, z: usize) -> TileId {
        self.editing_map()
            .map_or(EMPTY_TILE, |map| map.tile_id(x, y, z))
    }

    /// Set one tile on the editing map.
    ///
    /// Malformed tile codes are logged and place nothing. Returns false when
    /// nothing was placed.
    pub fn set_tile(
        &mut self,
        x: i32,
        y: i32,
        z: usize,
        tile: impl Into<TileRef>,
        options: PaintOptions,
    ) -> bool {
        let tile: TileRef = tile.into();
        let Some(tile_id) = tile.resolve_or_warn() else {
            return false;
        };
        let Some(mut editor) = self.editor() else {
            warn!("No map is available for tile editing");
            return false;
        };
        paint_tile(&mut editor, x, y, z, tile_id, options)
    }

    /// Run a fill request against the editing map
    pub fn fill_tiles(&mut self, request: &FillRequest) -> FillReport {
        let Some(mut editor) = self.editor() else {
            warn!("No map is available for tile editing");
            return FillReport::default();
        };
        fill_tiles(&mut editor, request)
    }

    // ─── Rendering ──────────────────────────────────────────────────────

    /// Whether the active map changed since the renderer last looked
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Ask the renderer to redraw the active map
    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
    }

    /// Read and clear the refresh flag
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.needs_refresh)
    }

    // ─── Save data ──────────────────────────────────────────────────────

    /// Add the change log to a save payload
    pub fn make_save_contents(&self, contents: &mut Map<String, Value>) -> Result<(), serde_json::Error> {
        self.change_log.embed(contents)
    }

    /// Replace the change log from a save payload.
    ///
    /// Cached maps and the link are dropped since they may hold edits the
    /// loaded save never made.
    pub fn extract_save_contents(&mut self, contents: &Value) {
        self.change_log = ChangeLog::extract(contents);
        self.map_cache.clear();
        self.linked_map_id = None;
        info!(
            "Loaded {} tile changes across {} maps from save data",
            self.change_log.len(),
            self.change_log.map_count()
        );
    }
}

impl std::fmt::Debug for MapEditingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapEditingContext")
            .field("active_map_id", &self.active_map_id)
            .field("linked_map_id", &self.linked_map_id)
            .field("cached_maps", &self.map_cache.len())
            .field("change_log", &self.change_log.len())
            .field("needs_refresh", &self.needs_refresh)
            .finish()
    }
}
