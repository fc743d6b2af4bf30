//! Data types for fill requests.
//!
//! The primary entry point is [`FillRequest`]: an origin, the tile to paint and
//! the filters that decide which cells receive it, plus optional [`CreepSettings`]
//! for a second, independently filtered spread around the filled cells.
//!
//! Every field deserializes leniently, so a request can be built straight from
//! host command arguments where booleans and numbers arrive as strings.

use serde::{Deserialize, Deserializer, Serialize};
use tile_control_autotile::PaintOptions;
use tile_control_core::{lenient, TileRef, LAYER_COUNT};

fn default_true() -> bool {
    true
}

// ─── Layer selection ─────────────────────────────────────────────────────────

/// Whether the tile-ID filter looks at a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum LayerUse {
    #[default]
    Recognize,
    Skip,
}

impl<'de> Deserialize<'de> for LayerUse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient::text(deserializer)?.trim() {
            "Skip" => LayerUse::Skip,
            _ => LayerUse::Recognize,
        })
    }
}

/// Which of the four tile layers the tile-ID filter inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerSelection {
    #[serde(default)]
    pub z0: LayerUse,
    #[serde(default)]
    pub z1: LayerUse,
    #[serde(default)]
    pub z2: LayerUse,
    #[serde(default)]
    pub z3: LayerUse,
}

impl LayerSelection {
    /// Inspect only the given layer
    pub fn only(z: usize) -> Self {
        let pick = |layer| {
            if layer == z {
                LayerUse::Recognize
            } else {
                LayerUse::Skip
            }
        };
        Self {
            z0: pick(0),
            z1: pick(1),
            z2: pick(2),
            z3: pick(3),
        }
    }

    pub fn recognizes(&self, z: usize) -> bool {
        let layer_use = match z {
            0 => self.z0,
            1 => self.z1,
            2 => self.z2,
            3 => self.z3,
            _ => return false,
        };
        layer_use == LayerUse::Recognize
    }

    /// The recognized layers, lowest first
    pub fn layers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..LAYER_COUNT).filter(move |&z| self.recognizes(z))
    }
}

// ─── Area ────────────────────────────────────────────────────────────────────

/// A rectangle given as two corners relative to the fill origin (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AreaFilter {
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub x1: i32,
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub y1: i32,
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub x2: i32,
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub y2: i32,
}

impl AreaFilter {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Absolute `(min_x, min_y, max_x, max_y)` around an origin. Corner order does not matter.
    pub fn bounds(&self, origin_x: i32, origin_y: i32) -> (i32, i32, i32, i32) {
        let (ax, bx) = (origin_x + self.x1, origin_x + self.x2);
        let (ay, by) = (origin_y + self.y1, origin_y + self.y2);
        (ax.min(bx), ay.min(by), ax.max(bx), ay.max(by))
    }

    pub fn contains(&self, origin_x: i32, origin_y: i32, x: i32, y: i32) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds(origin_x, origin_y);
        (min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y)
    }
}

// ─── Origin ──────────────────────────────────────────────────────────────────

/// What happens to the origin cell after the other filters ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OriginFilter {
    /// The origin is filled only if the filters selected it
    #[default]
    Regular,
    #[serde(rename = "Never Fill")]
    NeverFill,
    /// The origin joins the fill set, so creep spreads from it too
    #[serde(rename = "Always Fill (Before Creep)")]
    AlwaysFillBeforeCreep,
    /// The origin is painted last, after creep, so creep never overwrites it
    #[serde(rename = "Always Fill (After Creep)")]
    AlwaysFillAfterCreep,
}

impl OriginFilter {
    /// Parse the host's option name; unknown names are `Regular`
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Never Fill" => OriginFilter::NeverFill,
            "Always Fill (Before Creep)" => OriginFilter::AlwaysFillBeforeCreep,
            "Always Fill (After Creep)" => OriginFilter::AlwaysFillAfterCreep,
            _ => OriginFilter::Regular,
        }
    }
}

impl<'de> Deserialize<'de> for OriginFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_name(&lenient::text(deserializer)?))
    }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Filters shared by the fill and creep stages. Empty or unset filters are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileFilters {
    /// Keep cells tagged with one of these regions
    #[serde(default, deserialize_with = "lenient::u32_list")]
    pub regions: Vec<u32>,
    /// Keep cells where a recognized layer holds a matching tile (autotile families match as a whole)
    #[serde(default, alias = "tileIds_filter", deserialize_with = "lenient::tile_list")]
    pub tile_ids: Vec<TileRef>,
    /// Layers the tile-ID filter inspects
    #[serde(default, alias = "tileIds_z_filter")]
    pub tile_layers: LayerSelection,
    /// Keep cells inside this rectangle around the origin
    #[serde(default, alias = "area_filter")]
    pub area: Option<AreaFilter>,
    /// Keep only the edge of what is left
    #[serde(default, deserialize_with = "lenient::flag")]
    pub hollow: bool,
}

/// Filters for the primary fill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillFilters {
    #[serde(flatten)]
    pub tiles: TileFilters,
    /// Keep cells within this many cardinal steps of the origin; 0 disables the filter
    #[serde(default, deserialize_with = "lenient::count")]
    pub distance: u32,
    #[serde(default)]
    pub origin: OriginFilter,
}

/// A second spread of tiles into the cells around the fill set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreepSettings {
    /// How many cardinal steps creep spreads from the fill set; 0 disables creep
    #[serde(default, alias = "creepDistance", deserialize_with = "lenient::count")]
    pub distance: u32,
    /// Tile to spread; the fill tile when unset
    #[serde(default, alias = "creepTileId", deserialize_with = "lenient::optional_tile")]
    pub tile: Option<TileRef>,
    /// Layer to spread on; the fill layer when unset
    #[serde(default, alias = "creepZ", deserialize_with = "lenient::optional_layer")]
    pub z: Option<usize>,
    #[serde(
        default = "default_true",
        alias = "creepClearUpperLayers",
        deserialize_with = "lenient::flag"
    )]
    pub clear_upper_layers: bool,
    #[serde(
        default = "default_true",
        alias = "creepAllowAutotiling",
        deserialize_with = "lenient::flag"
    )]
    pub allow_autotiling: bool,
    #[serde(flatten)]
    pub filters: TileFilters,
}

impl Default for CreepSettings {
    fn default() -> Self {
        Self {
            distance: 0,
            tile: None,
            z: None,
            clear_upper_layers: true,
            allow_autotiling: true,
            filters: TileFilters::default(),
        }
    }
}

impl CreepSettings {
    pub fn new(distance: u32) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.distance > 0
    }

    pub fn with_tile(mut self, tile: impl Into<TileRef>) -> Self {
        self.tile = Some(tile.into());
        self
    }

    pub fn with_z(mut self, z: usize) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_paint(mut self, paint: PaintOptions) -> Self {
        self.clear_upper_layers = paint.clear_upper_layers;
        self.allow_autotiling = paint.allow_autotiling;
        self
    }

    pub fn with_filters(mut self, filters: TileFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn paint_options(&self) -> PaintOptions {
        PaintOptions {
            clear_upper_layers: self.clear_upper_layers,
            allow_autotiling: self.allow_autotiling,
        }
    }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// A complete fill: origin, tile, paint options, filters and creep.
///
/// Built fresh for every call; nothing here is shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRequest {
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub x: i32,
    #[serde(default, deserialize_with = "lenient::coordinate")]
    pub y: i32,
    #[serde(default, deserialize_with = "lenient::layer")]
    pub z: usize,
    /// Tile to paint. `None` selects cells without painting them (creep-only fills).
    #[serde(default, alias = "tileId", deserialize_with = "lenient::optional_tile")]
    pub tile: Option<TileRef>,
    #[serde(flatten)]
    pub paint: PaintOptions,
    #[serde(default)]
    pub filters: FillFilters,
    #[serde(default)]
    pub creep: CreepSettings,
}

impl FillRequest {
    pub fn new(x: i32, y: i32, z: usize, tile: impl Into<TileRef>) -> Self {
        Self {
            x,
            y,
            z,
            tile: Some(tile.into()),
            ..Default::default()
        }
    }

    /// A request that selects cells but paints nothing itself
    pub fn without_tile(x: i32, y: i32, z: usize) -> Self {
        Self {
            x,
            y,
            z,
            ..Default::default()
        }
    }

    pub fn with_paint(mut self, paint: PaintOptions) -> Self {
        self.paint = paint;
        self
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = u32>) -> Self {
        self.filters.tiles.regions = regions.into_iter().collect();
        self
    }

    pub fn with_tile_ids<T: Into<TileRef>>(mut self, tiles: impl IntoIterator<Item = T>) -> Self {
        self.filters.tiles.tile_ids = tiles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tile_layers(mut self, layers: LayerSelection) -> Self {
        self.filters.tiles.tile_layers = layers;
        self
    }

    pub fn with_area(mut self, area: AreaFilter) -> Self {
        self.filters.tiles.area = Some(area);
        self
    }

    pub fn with_distance(mut self, distance: u32) -> Self {
        self.filters.distance = distance;
        self
    }

    pub fn with_hollow(mut self, hollow: bool) -> Self {
        self.filters.tiles.hollow = hollow;
        self
    }

    pub fn with_origin(mut self, origin: OriginFilter) -> Self {
        self.filters.origin = origin;
        self
    }

    pub fn with_creep(mut self, creep: CreepSettings) -> Self {
        self.creep = creep;
        self
    }
}
