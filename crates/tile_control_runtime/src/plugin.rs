//! Bevy integration: tells the renderer when the active map changed
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tile_control_runtime::{
//!     FileMapLoader, MapEditingContext, TileControlPlugin, TilemapRefreshRequested,
//! };
//!
//! App::new()
//!     .add_plugins(TileControlPlugin)
//!     .insert_resource(MapEditingContext::new(FileMapLoader::new("data"), tilesets))
//!     .add_systems(Update, redraw_tilemap)
//!     .run();
//!
//! fn redraw_tilemap(mut requests: MessageReader<TilemapRefreshRequested>) {
//!     for request in requests.read() {
//!         // rebuild the tilemap of request.map_id
//!     }
//! }
//! ```

use bevy::prelude::*;

use crate::context::MapEditingContext;

/// Message sent when tiles of the active map changed and it must be redrawn
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilemapRefreshRequested {
    pub map_id: i32,
}

/// Plugin that turns the editing context's refresh flag into messages
pub struct TileControlPlugin;

impl Plugin for TileControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Messages<TilemapRefreshRequested>>()
            .add_systems(Update, request_tilemap_refresh);
    }
}

/// System that consumes the refresh flag once per frame
fn request_tilemap_refresh(
    context: Option<ResMut<MapEditingContext>>,
    mut refresh: MessageWriter<TilemapRefreshRequested>,
) {
    let Some(mut context) = context else { return };
    if context.take_refresh() {
        let map_id = context.active_map_id();
        refresh.write(TilemapRefreshRequested { map_id });
    }
}
