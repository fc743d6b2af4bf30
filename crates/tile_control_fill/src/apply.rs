//! The fill engine: runs the filter pipeline of a [`FillRequest`] and paints the result.
//!
//! The entry point is [`fill_tiles`]. [`select_fill_tiles`] and
//! [`select_creep_tiles`] expose the two selection passes on their own.

use tile_control_autotile::paint_tile;
use tile_control_core::{TileId, TileRef, TileSink, TileSource};
use tracing::{debug, warn};

use crate::filters::{filter_area, filter_distance, filter_hollow, filter_regions, filter_tile_ids};
use crate::selection::TileSelection;
use crate::types::{FillRequest, OriginFilter, TileFilters};

/// How many cells a fill painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    /// Cells painted with the fill tile, including a deferred origin
    pub filled: usize,
    /// Cells painted by creep
    pub crept: usize,
}

impl FillReport {
    pub fn total(&self) -> usize {
        self.filled + self.crept
    }
}

// ─── Public entry points ─────────────────────────────────────────────────────

/// Run a complete fill on `grid`.
///
/// Order of work:
/// 1. select the fill set and paint it with the fill tile
/// 2. select creep cells around the (already painted) fill set and paint them
/// 3. paint the origin when the origin filter defers it until after creep
///
/// An origin off the map does nothing. A fill or creep code that does not
/// parse counts as no tile, so its writes are skipped.
pub fn fill_tiles<G: TileSink + ?Sized>(grid: &mut G, request: &FillRequest) -> FillReport {
    let mut report = FillReport::default();
    if !grid.in_bounds(request.x, request.y) {
        return report;
    }

    let fill_tile = request.tile.as_ref().and_then(TileRef::resolve_or_warn);
    let fill_set = select_fill_tiles(&*grid, request);

    if let Some(tile_id) = fill_tile {
        report.filled = paint_selection(grid, &fill_set, request.z, tile_id, request);
    }

    let creep = &request.creep;
    if creep.is_enabled() {
        let creep_tile = match &creep.tile {
            Some(tile) => tile.resolve_or_warn(),
            None => fill_tile,
        };
        let creep_z = creep.z.unwrap_or(request.z);
        let creep_set = select_creep_tiles(&*grid, request, &fill_set);
        if let Some(tile_id) = creep_tile {
            let options = creep.paint_options();
            for (x, y) in creep_set.iter() {
                if paint_tile(&mut *grid, x, y, creep_z, tile_id, options) {
                    report.crept += 1;
                }
            }
        }
    }

    if request.filters.origin == OriginFilter::AlwaysFillAfterCreep {
        if let Some(tile_id) = fill_tile {
            if paint_tile(grid, request.x, request.y, request.z, tile_id, request.paint) {
                report.filled += 1;
            }
        }
    }

    debug!(
        "Fill at ({}, {}, {}) painted {} tiles and crept into {}",
        request.x, request.y, request.z, report.filled, report.crept
    );
    report
}

/// Select the cells the fill tile goes to: every map cell, narrowed by the
/// region, tile-ID, area, distance and hollow filters, then the origin filter.
pub fn select_fill_tiles<G: TileSource + ?Sized>(grid: &G, request: &FillRequest) -> TileSelection {
    let (x, y) = (request.x, request.y);
    let filters = &request.filters;
    let mut selection = TileSelection::full(grid.width(), grid.height());

    apply_tile_filters(grid, &mut selection, &filters.tiles, x, y, "");

    if filters.distance > 0 {
        let origin = TileSelection::from_cells(grid.width(), grid.height(), [(x, y)]);
        run_stage("Distance", &mut selection, |current| {
            filter_distance(current, &origin, filters.distance, false)
        });
    }

    if filters.tiles.hollow {
        selection = filter_hollow(&selection);
    }

    match filters.origin {
        OriginFilter::NeverFill => {
            selection.remove(x, y);
        }
        OriginFilter::AlwaysFillBeforeCreep => {
            selection.insert(x, y);
        }
        OriginFilter::Regular | OriginFilter::AlwaysFillAfterCreep => {}
    }

    selection
}

/// Select the creep cells for a fill whose fill set is `fill_set`.
///
/// Candidates are the cells outside the fill set that pass creep's own region,
/// tile-ID and area filters. Creep spreads from the whole fill set through
/// those candidates for `creep.distance` steps; the fill set itself is never
/// part of the result. Creep's hollow filter applies last.
pub fn select_creep_tiles<G: TileSource + ?Sized>(
    grid: &G,
    request: &FillRequest,
    fill_set: &TileSelection,
) -> TileSelection {
    let creep = &request.creep;
    let mut candidates = fill_set.complement();

    apply_tile_filters(grid, &mut candidates, &creep.filters, request.x, request.y, "Creep ");

    let permitted = candidates.union(fill_set);
    let mut selection = candidates;
    run_stage("Creep Distance", &mut selection, |_| {
        filter_distance(&permitted, fill_set, creep.distance, true)
    });

    if creep.filters.hollow {
        selection = filter_hollow(&selection);
    }
    selection
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Region, tile-ID and area stages, shared by fill and creep
fn apply_tile_filters<G: TileSource + ?Sized>(
    grid: &G,
    selection: &mut TileSelection,
    filters: &TileFilters,
    origin_x: i32,
    origin_y: i32,
    label: &str,
) {
    if !filters.regions.is_empty() {
        run_stage(&format!("{label}Region(s)"), selection, |current| {
            let mut kept = current.clone();
            filter_regions(grid, &mut kept, &filters.regions);
            kept
        });
    }

    if !filters.tile_ids.is_empty() {
        let tile_ids = resolve_tile_list(&filters.tile_ids);
        run_stage(&format!("{label}Tile ID(s)"), selection, |current| {
            let mut kept = current.clone();
            filter_tile_ids(grid, &mut kept, &tile_ids, &filters.tile_layers);
            kept
        });
    }

    if let Some(area) = &filters.area {
        run_stage(&format!("{label}Area"), selection, |current| {
            let mut kept = current.clone();
            filter_area(&mut kept, area, origin_x, origin_y);
            kept
        });
    }
}

/// Run one filter stage, warning when it rejects every remaining cell
fn run_stage(
    stage: &str,
    selection: &mut TileSelection,
    filter: impl FnOnce(&TileSelection) -> TileSelection,
) {
    let entered = selection.len();
    *selection = filter(selection);
    if entered > 0 && selection.is_empty() {
        warn!(
            "Tile Fill: of {} tiles entered into the {} filter, none of the tiles passed the {} filter",
            entered, stage, stage
        );
    }
}

/// Tile codes in a filter list. Codes that do not parse are dropped, so a typo
/// never turns into a filter for empty cells.
fn resolve_tile_list(tiles: &[TileRef]) -> Vec<TileId> {
    tiles
        .iter()
        .filter_map(|tile| match tile.try_resolve() {
            Ok(tile_id) => Some(tile_id),
            Err(err) => {
                warn!("Ignoring tile filter entry: {}", err);
                None
            }
        })
        .collect()
}

fn paint_selection<G: TileSink + ?Sized>(
    grid: &mut G,
    selection: &TileSelection,
    z: usize,
    tile_id: TileId,
    request: &FillRequest,
) -> usize {
    let mut painted = 0;
    for (x, y) in selection.iter() {
        if paint_tile(&mut *grid, x, y, z, tile_id, request.paint) {
            painted += 1;
        }
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AreaFilter, CreepSettings, LayerSelection};
    use tile_control_autotile::PaintOptions;
    use tile_control_core::{MapData, REGION_LAYER};

    const OCEAN: TileId = 2048;
    const GRASS: TileId = 2816;
    const STONE: TileId = 5;

    fn blank() -> MapData {
        MapData::new(10, 10, 1)
    }

    fn painted(map: &MapData, z: usize) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in 0..10 {
            for x in 0..10 {
                if map.tile_id(x, y, z) != 0 {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    fn block(min: (i32, i32), max: (i32, i32)) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in min.1..=max.1 {
            for x in min.0..=max.0 {
                cells.push((x, y));
            }
        }
        cells
    }

    fn area_request(tile: TileId) -> FillRequest {
        FillRequest::new(5, 5, 0, tile)
            .with_paint(PaintOptions::exact())
            .with_area(AreaFilter::new(-1, -1, 1, 1))
    }

    #[test]
    fn test_area_fill_is_three_by_three() {
        let mut map = blank();
        let report = fill_tiles(&mut map, &area_request(STONE));
        assert_eq!(report.filled, 9);
        assert_eq!(painted(&map, 0), block((4, 4), (6, 6)));
    }

    #[test]
    fn test_unfiltered_fill_covers_map() {
        let map = blank();
        let request = FillRequest::new(0, 0, 0, STONE);
        assert_eq!(select_fill_tiles(&map, &request).len(), 100);
    }

    #[test]
    fn test_fill_reshapes_autotiles() {
        let mut map = blank();
        let request = FillRequest::new(5, 5, 0, OCEAN).with_area(AreaFilter::new(-1, -1, 1, 1));
        fill_tiles(&mut map, &request);
        assert_eq!(map.tile_id(5, 5, 0), OCEAN);
        assert_eq!(map.tile_id(4, 4, 0), OCEAN + 34);
        assert_eq!(map.tile_id(6, 6, 0), OCEAN + 38);
    }

    #[test]
    fn test_creep_ring_excludes_diagonals() {
        let mut map = blank();
        let creep = CreepSettings::new(1)
            .with_tile(GRASS)
            .with_paint(PaintOptions::exact());
        let report = fill_tiles(&mut map, &area_request(STONE).with_creep(creep));

        assert_eq!(report.filled, 9);
        assert_eq!(report.crept, 12);
        for (x, y) in block((4, 4), (6, 6)) {
            assert_eq!(map.tile_id(x, y, 0), STONE);
        }
        assert_eq!(map.tile_id(5, 3, 0), GRASS);
        assert_eq!(map.tile_id(3, 4, 0), GRASS);
        assert_eq!(map.tile_id(7, 6, 0), GRASS);
        assert_eq!(map.tile_id(4, 7, 0), GRASS);
        // Diagonal corners are two steps away
        assert_eq!(map.tile_id(3, 3, 0), 0);
        assert_eq!(map.tile_id(7, 7, 0), 0);
    }

    #[test]
    fn test_creep_defaults_to_fill_tile_and_layer() {
        let mut map = blank();
        let request = area_request(STONE).with_creep(CreepSettings::new(1));
        fill_tiles(&mut map, &request);
        assert_eq!(map.tile_id(5, 3, 0), STONE);
        assert_eq!(painted(&map, 0).len(), 21);
    }

    #[test]
    fn test_creep_on_its_own_layer() {
        let mut map = blank();
        let creep = CreepSettings::new(2)
            .with_tile(GRASS)
            .with_z(1)
            .with_paint(PaintOptions::exact());
        fill_tiles(&mut map, &area_request(STONE).with_creep(creep));
        assert_eq!(painted(&map, 0).len(), 9);
        // Radius-2 ring around a 3x3 block: 12 + 16 cells
        assert_eq!(painted(&map, 1).len(), 28);
    }

    #[test]
    fn test_creep_filters_limit_candidates() {
        let mut map = blank();
        for y in 0..10 {
            map.write_exact(7, y, REGION_LAYER, 2).unwrap();
        }
        let mut creep = CreepSettings::new(1)
            .with_tile(GRASS)
            .with_paint(PaintOptions::exact());
        creep.filters.regions = vec![2];
        fill_tiles(&mut map, &area_request(STONE).with_creep(creep));
        let grass: Vec<_> = painted(&map, 0)
            .into_iter()
            .filter(|&(x, y)| map.tile_id(x, y, 0) == GRASS)
            .collect();
        assert_eq!(grass, vec![(7, 4), (7, 5), (7, 6)]);
    }

    #[test]
    fn test_creep_only_request() {
        let mut map = blank();
        let request = FillRequest::without_tile(5, 5, 0)
            .with_area(AreaFilter::new(0, 0, 0, 0))
            .with_creep(CreepSettings::new(1).with_tile(GRASS).with_paint(PaintOptions::exact()));
        let report = fill_tiles(&mut map, &request);
        assert_eq!(report.filled, 0);
        assert_eq!(report.crept, 4);
        assert_eq!(map.tile_id(5, 5, 0), 0);
    }

    #[test]
    fn test_origin_never_fill() {
        let map = blank();
        let request = area_request(STONE).with_origin(OriginFilter::NeverFill);
        let selection = select_fill_tiles(&map, &request);
        assert_eq!(selection.len(), 8);
        assert!(!selection.contains(5, 5));
    }

    #[test]
    fn test_origin_before_creep_joins_fill_set() {
        let mut map = blank();
        map.write_exact(5, 5, REGION_LAYER, 9).unwrap();
        map.write_exact(0, 0, REGION_LAYER, 1).unwrap();
        let request = FillRequest::new(5, 5, 0, STONE)
            .with_paint(PaintOptions::exact())
            .with_regions([1])
            .with_origin(OriginFilter::AlwaysFillBeforeCreep)
            .with_creep(
                CreepSettings::new(1)
                    .with_tile(GRASS)
                    .with_paint(PaintOptions::exact()),
            );

        fill_tiles(&mut map, &request);
        assert_eq!(map.tile_id(5, 5, 0), STONE);
        assert_eq!(map.tile_id(0, 0, 0), STONE);
        // Creep spreads from the origin as well
        assert_eq!(map.tile_id(5, 4, 0), GRASS);
        assert_eq!(map.tile_id(1, 0, 0), GRASS);
    }

    #[test]
    fn test_origin_after_creep_survives_creep() {
        let mut map = blank();
        let request = area_request(STONE)
            .with_origin(OriginFilter::AlwaysFillAfterCreep)
            .with_hollow(true)
            .with_creep(CreepSettings::new(1).with_tile(GRASS));

        // The hollow ring leaves the origin out; creep then reaches it from the ring
        let fill_set = select_fill_tiles(&map, &request);
        assert!(!fill_set.contains(5, 5));
        assert!(select_creep_tiles(&map, &request, &fill_set).contains(5, 5));

        let report = fill_tiles(&mut map, &request);
        assert_eq!(map.tile_id(5, 5, 0), STONE);
        assert_eq!(report.filled, 9);
    }

    #[test]
    fn test_distance_filter_from_origin() {
        let map = blank();
        let request = FillRequest::new(5, 5, 0, STONE).with_distance(1);
        let selection = select_fill_tiles(&map, &request);
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec![(5, 4), (4, 5), (5, 5), (6, 5), (5, 6)]
        );
    }

    #[test]
    fn test_hollow_fill() {
        let mut map = blank();
        fill_tiles(&mut map, &area_request(STONE).with_hollow(true));
        assert_eq!(painted(&map, 0).len(), 8);
        assert_eq!(map.tile_id(5, 5, 0), 0);
    }

    #[test]
    fn test_tile_id_filter_replaces_family() {
        let mut map = blank();
        fill_tiles(
            &mut map,
            &FillRequest::new(2, 2, 0, OCEAN).with_area(AreaFilter::new(0, 0, 2, 0)),
        );
        let request = FillRequest::new(0, 0, 0, GRASS)
            .with_tile_ids(["A0,0"])
            .with_tile_layers(LayerSelection::only(0));
        let report = fill_tiles(&mut map, &request);
        assert_eq!(report.filled, 3);
        assert_eq!(map.tile_id(3, 2, 0), GRASS + 33);
    }

    #[test]
    fn test_empty_stage_empties_fill() {
        let mut map = blank();
        let report = fill_tiles(&mut map, &area_request(STONE).with_regions([42]));
        assert_eq!(report, FillReport::default());
        assert!(painted(&map, 0).is_empty());
    }

    #[test]
    fn test_malformed_filter_codes_are_dropped() {
        assert_eq!(
            resolve_tile_list(&[TileRef::from("Q1"), TileRef::from("B2"), TileRef::Id(7)]),
            vec![2, 7]
        );
    }

    #[test]
    fn test_malformed_fill_code_leaves_map_unchanged() {
        let mut map = MapData::new(4, 4, 1);
        for y in 0..4 {
            for x in 0..4 {
                map.write_exact(x, y, 0, STONE).unwrap();
                map.write_exact(x, y, 1, 7).unwrap();
            }
        }
        let before = map.clone();

        let report = fill_tiles(&mut map, &FillRequest::new(0, 0, 0, "Z9"));
        assert_eq!(report, FillReport::default());
        assert_eq!(map, before);

        // Creep falls back to the fill tile, which is missing too
        let request = FillRequest::new(0, 0, 0, "Z9")
            .with_area(AreaFilter::new(0, 0, 0, 0))
            .with_creep(CreepSettings::new(1));
        assert_eq!(fill_tiles(&mut map, &request).total(), 0);
        assert_eq!(map, before);
    }

    #[test]
    fn test_malformed_creep_code_skips_creep_only() {
        let mut map = blank();
        let creep = CreepSettings::new(1).with_tile("A99,99");
        let report = fill_tiles(&mut map, &area_request(STONE).with_creep(creep));
        assert_eq!(report.filled, 9);
        assert_eq!(report.crept, 0);
        assert_eq!(painted(&map, 0), block((4, 4), (6, 6)));
    }

    #[test]
    fn test_origin_off_map_does_nothing() {
        let mut map = blank();
        let report = fill_tiles(&mut map, &FillRequest::new(10, 0, 0, STONE));
        assert_eq!(report.total(), 0);
        assert!(painted(&map, 0).is_empty());
    }
}
