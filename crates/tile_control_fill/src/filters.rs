//! Selection filters. Each one narrows a [`TileSelection`] and never grows it.

use tile_control_core::{is_tile_match, TileId, TileSource};

use crate::selection::TileSelection;
use crate::types::{AreaFilter, LayerSelection};

const CARDINALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const ALL_AROUND: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Keep cells whose region tag is one of `regions`
pub fn filter_regions<G: TileSource + ?Sized>(
    grid: &G,
    selection: &mut TileSelection,
    regions: &[u32],
) {
    selection.retain(|x, y| regions.contains(&grid.region_id(x, y)));
}

/// Keep cells where at least one recognized layer holds a tile matching one of `tile_ids`
pub fn filter_tile_ids<G: TileSource + ?Sized>(
    grid: &G,
    selection: &mut TileSelection,
    tile_ids: &[TileId],
    layers: &LayerSelection,
) {
    selection.retain(|x, y| {
        layers.layers().any(|z| {
            let current = grid.tile_id(x, y, z);
            tile_ids.iter().any(|&wanted| is_tile_match(current, wanted))
        })
    });
}

/// Keep cells inside `area`, placed relative to the origin
pub fn filter_area(selection: &mut TileSelection, area: &AreaFilter, origin_x: i32, origin_y: i32) {
    selection.retain(|x, y| area.contains(origin_x, origin_y, x, y));
}

/// Cells of `permitted` reachable from `origins` in at most `distance` cardinal steps.
///
/// A level-order search: each round adds the current frontier to the result and
/// steps to unvisited permitted neighbours. Origins outside `permitted` are
/// neither selected nor expanded. With `exclude_origin` the origin cells are
/// walked through but left out of the result.
pub fn filter_distance(
    permitted: &TileSelection,
    origins: &TileSelection,
    distance: u32,
    exclude_origin: bool,
) -> TileSelection {
    let (width, height) = (permitted.width(), permitted.height());
    let mut result = TileSelection::empty(width, height);
    let mut visited = TileSelection::empty(width, height);

    let mut frontier: Vec<(i32, i32)> = origins
        .iter()
        .filter(|&(x, y)| permitted.contains(x, y))
        .collect();
    for &(x, y) in &frontier {
        visited.insert(x, y);
    }

    let mut step = 0;
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &(x, y) in &frontier {
            if !(exclude_origin && origins.contains(x, y)) {
                result.insert(x, y);
            }
            if step == distance {
                continue;
            }
            for (dx, dy) in CARDINALS {
                let (nx, ny) = (x + dx, y + dy);
                if permitted.contains(nx, ny) && visited.insert(nx, ny) {
                    next.push((nx, ny));
                }
            }
        }
        if step == distance {
            break;
        }
        frontier = next;
        step += 1;
    }

    result
}

/// Keep only the edge of the selection: cells with at least one of their 8
/// neighbours missing from it. The map border counts as missing.
pub fn filter_hollow(selection: &TileSelection) -> TileSelection {
    let mut edge = selection.clone();
    edge.retain(|x, y| {
        ALL_AROUND
            .iter()
            .any(|&(dx, dy)| !selection.contains(x + dx, y + dy))
    });
    edge
}
