//! Single-tile painting with autotile shaping and neighbour updates

use serde::{Deserialize, Serialize};
use tile_control_core::{
    autotile_base, autotile_kind, lenient, TileId, TileSink, TileSource, EMPTY_TILE, LAYER_COUNT,
};
use tracing::debug;

use crate::family::AutotileFamily;
use crate::shape::{calculate_bitmask, shape_for};

/// Options for a single tile write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintOptions {
    /// Erase every layer above the painted one
    #[serde(
        default = "default_true",
        alias = "clear_upper_layers",
        deserialize_with = "lenient::flag"
    )]
    pub clear_upper_layers: bool,
    /// Shape the painted autotile and re-shape its neighbours
    #[serde(
        default = "default_true",
        alias = "allow_autotiling",
        deserialize_with = "lenient::flag"
    )]
    pub allow_autotiling: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            clear_upper_layers: true,
            allow_autotiling: true,
        }
    }
}

impl PaintOptions {
    /// Write exactly the given tile, touching nothing else
    pub fn exact() -> Self {
        Self {
            clear_upper_layers: false,
            allow_autotiling: false,
        }
    }

    pub fn with_clear_upper_layers(mut self, clear: bool) -> Self {
        self.clear_upper_layers = clear;
        self
    }

    pub fn with_autotiling(mut self, allow: bool) -> Self {
        self.allow_autotiling = allow;
        self
    }
}

/// Neighbour bitmask of `(x, y, z)` against autotile family `kind`.
///
/// Neighbours outside the grid count as matches so map edges do not draw borders.
pub fn neighbor_mask<G: TileSource + ?Sized>(grid: &G, x: i32, y: i32, z: usize, kind: u32) -> u8 {
    calculate_bitmask(x, y, |nx, ny| {
        !grid.in_bounds(nx, ny) || grid.autotile_kind_at(nx, ny, z) == Some(kind)
    })
}

/// Tile ID a member of family `kind` should show at `(x, y, z)` given its
/// current neighbours. The cell's own content is not consulted.
pub fn shape_autotile<G: TileSource + ?Sized>(
    grid: &G,
    x: i32,
    y: i32,
    z: usize,
    kind: u32,
) -> TileId {
    let family = AutotileFamily::of_kind(kind);
    autotile_base(kind) + shape_for(family, neighbor_mask(grid, x, y, z, kind))
}

/// Correctly shaped version of the tile currently at `(x, y, z)`.
/// Non-autotiles are returned unchanged.
pub fn shape_at<G: TileSource + ?Sized>(grid: &G, x: i32, y: i32, z: usize) -> TileId {
    let tile_id = grid.tile_id(x, y, z);
    match autotile_kind(tile_id) {
        Some(kind) => shape_autotile(grid, x, y, z, kind),
        None => tile_id,
    }
}

/// Re-shape the autotiles of one cell on layers `z..4`.
///
/// Returns the number of layers whose shape changed.
pub fn reshape_cell<G: TileSink + ?Sized>(grid: &mut G, x: i32, y: i32, z: usize) -> usize {
    if !grid.in_bounds(x, y) {
        return 0;
    }

    let mut changed = 0;
    for layer in z..LAYER_COUNT {
        let current = grid.tile_id(x, y, layer);
        let shaped = shape_at(&*grid, x, y, layer);
        if shaped == current {
            continue;
        }
        match grid.write_exact(x, y, layer, shaped) {
            Ok(()) => changed += 1,
            Err(err) => debug!("Autotile at ({}, {}, {}) not reshaped: {}", x, y, layer, err),
        }
    }
    changed
}

/// Re-shape `(x, y)` and its 8 neighbours on layers `z..4`
pub fn reshape_neighbors<G: TileSink + ?Sized>(grid: &mut G, x: i32, y: i32, z: usize) -> usize {
    const AROUND: [(i32, i32); 9] = [
        (0, 0),
        (0, -1),
        (1, 0),
        (0, 1),
        (-1, 0),
        (-1, -1),
        (-1, 1),
        (1, -1),
        (1, 1),
    ];

    let mut changed = 0;
    for (dx, dy) in AROUND {
        changed += reshape_cell(&mut *grid, x + dx, y + dy, z);
    }
    changed
}

/// Paint one tile.
///
/// Upper layers are cleared first when requested, then the tile is shaped to
/// fit its neighbours (autotiles only) and written, and finally the
/// surrounding autotiles are re-shaped so they blend with it.
///
/// Returns false when nothing was painted: the cell is off the map or the
/// write was refused by the grid.
pub fn paint_tile<G: TileSink + ?Sized>(
    grid: &mut G,
    x: i32,
    y: i32,
    z: usize,
    tile_id: TileId,
    options: PaintOptions,
) -> bool {
    if !grid.in_bounds(x, y) {
        return false;
    }

    if options.clear_upper_layers {
        for layer in (z + 1)..LAYER_COUNT {
            // A refused clear leaves that layer as it was
            let _ = grid.write_exact(x, y, layer, EMPTY_TILE);
        }
    }

    let mut tile_id = tile_id;
    if options.allow_autotiling && z < LAYER_COUNT {
        if let Some(kind) = autotile_kind(tile_id) {
            tile_id = shape_autotile(&*grid, x, y, z, kind);
        }
    }

    let painted = match grid.write_exact(x, y, z, tile_id) {
        Ok(()) => true,
        Err(err) => {
            debug!("Tile {} not painted: {}", tile_id, err);
            false
        }
    };

    if options.allow_autotiling {
        reshape_neighbors(grid, x, y, z);
    }

    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_control_core::MapData;

    const OCEAN: TileId = 2048;
    const WATERFALL: TileId = 2048 + 5 * 48;
    const ROOF: TileId = 4352;

    fn blank(width: u32, height: u32) -> MapData {
        MapData::new(width, height, 1)
    }

    #[test]
    fn test_paint_isolated_ocean() {
        let mut map = blank(8, 8);
        map.write_exact(5, 5, 2, 17).unwrap();

        assert!(paint_tile(&mut map, 5, 5, 0, OCEAN, PaintOptions::default()));

        assert_eq!(map.tile_id(5, 5, 0), OCEAN + 46);
        for layer in 1..4 {
            assert_eq!(map.tile_id(5, 5, layer), 0);
        }
        // Blank neighbours are not autotiles and stay blank
        assert_eq!(map.tile_id(4, 4, 0), 0);
        assert_eq!(map.tile_id(6, 6, 0), 0);
    }

    #[test]
    fn test_paint_at_map_corner() {
        let mut map = blank(8, 8);
        paint_tile(&mut map, 0, 0, 0, OCEAN, PaintOptions::default());
        // Off-map north and west count as water
        assert_eq!(map.tile_id(0, 0, 0), OCEAN + 38);
    }

    #[test]
    fn test_paint_block_reshapes_neighbors() {
        let mut map = blank(8, 8);
        for y in 2..5 {
            for x in 2..5 {
                paint_tile(&mut map, x, y, 0, OCEAN, PaintOptions::default());
            }
        }

        assert_eq!(map.tile_id(3, 3, 0), OCEAN);
        assert_eq!(map.tile_id(2, 2, 0), OCEAN + 34);
        assert_eq!(map.tile_id(3, 2, 0), OCEAN + 20);
        assert_eq!(map.tile_id(4, 4, 0), OCEAN + 38);
        assert_eq!(map.tile_id(2, 3, 0), OCEAN + 16);
    }

    #[test]
    fn test_paint_order_does_not_matter() {
        let cells = [(2, 2), (3, 2), (3, 3), (4, 3), (2, 4), (3, 4)];
        let mut forward = blank(6, 6);
        let mut backward = blank(6, 6);
        for &(x, y) in &cells {
            paint_tile(&mut forward, x, y, 0, OCEAN, PaintOptions::default());
        }
        for &(x, y) in cells.iter().rev() {
            paint_tile(&mut backward, x, y, 0, OCEAN, PaintOptions::default());
        }
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_shape_is_idempotent() {
        let mut map = blank(6, 6);
        for &(x, y) in &[(1, 1), (2, 1), (2, 2), (3, 3)] {
            paint_tile(&mut map, x, y, 0, OCEAN, PaintOptions::default());
        }
        for y in 0..6 {
            for x in 0..6 {
                let shaped = shape_at(&map, x, y, 0);
                assert_eq!(shaped, map.tile_id(x, y, 0));
                let mut again = map.clone();
                again.write_exact(x, y, 0, shaped).unwrap();
                assert_eq!(shape_at(&again, x, y, 0), shaped);
            }
        }
    }

    #[test]
    fn test_exact_paint_skips_shaping_and_clearing() {
        let mut map = blank(4, 4);
        map.write_exact(1, 1, 1, 9).unwrap();
        paint_tile(&mut map, 1, 1, 0, OCEAN, PaintOptions::exact());
        assert_eq!(map.tile_id(1, 1, 0), OCEAN);
        assert_eq!(map.tile_id(1, 1, 1), 9);
    }

    #[test]
    fn test_out_of_bounds_paint_is_noop() {
        let mut map = blank(4, 4);
        let before = map.clone();
        assert!(!paint_tile(&mut map, 4, 0, 0, OCEAN, PaintOptions::default()));
        assert!(!paint_tile(&mut map, -1, 2, 0, OCEAN, PaintOptions::default()));
        assert_eq!(map, before);
    }

    #[test]
    fn test_clearing_upper_layer_reshapes_its_neighbors() {
        let mut map = blank(8, 8);
        paint_tile(&mut map, 4, 5, 1, OCEAN, PaintOptions::default());
        paint_tile(&mut map, 5, 5, 1, OCEAN, PaintOptions::default());
        // Joined horizontally: west end piece
        assert_eq!(map.tile_id(4, 5, 1), OCEAN + 43);

        paint_tile(&mut map, 5, 5, 0, 3, PaintOptions::default());
        assert_eq!(map.tile_id(5, 5, 1), 0);
        assert_eq!(map.tile_id(4, 5, 1), OCEAN + 46);
    }

    #[test]
    fn test_waterfall_pair() {
        let mut map = blank(8, 8);
        paint_tile(&mut map, 3, 3, 0, WATERFALL, PaintOptions::default());
        paint_tile(&mut map, 4, 3, 0, WATERFALL, PaintOptions::default());
        assert_eq!(map.tile_id(3, 3, 0), WATERFALL + 1);
        assert_eq!(map.tile_id(4, 3, 0), WATERFALL + 2);
    }

    #[test]
    fn test_building_shapes() {
        let mut map = blank(8, 8);
        paint_tile(&mut map, 3, 3, 0, ROOF, PaintOptions::default());
        assert_eq!(map.tile_id(3, 3, 0), ROOF + 15);

        paint_tile(&mut map, 3, 4, 0, ROOF, PaintOptions::default());
        // Upper piece is open everywhere but south
        assert_eq!(map.tile_id(3, 3, 0), ROOF + 7);
        assert_eq!(map.tile_id(3, 4, 0), ROOF + 13);
    }

    #[test]
    fn test_paint_options_from_host_strings() {
        let options: PaintOptions =
            serde_json::from_str(r#"{"clearUpperLayers": "false", "allowAutotiling": "true"}"#)
                .unwrap();
        assert_eq!(options, PaintOptions::default().with_clear_upper_layers(false));

        let options: PaintOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, PaintOptions::default());
    }
}
