//! Tile-ID ranges and autotile family arithmetic
//!
//! Every drawable tile is a single integer in `0..8192`. The ranges are fixed:
//!
//! | Range | Sheet |
//! |---|---|
//! | `0..256` | B |
//! | `256..512` | C |
//! | `512..768` | D |
//! | `768..1536` | E |
//! | `1536..2048` | A5 |
//! | `2048..8192` | A1-A4, 48 IDs per autotile family |

/// Canonical integer identifying one drawable tile
pub type TileId = u32;

pub const TILE_ID_B: TileId = 0;
pub const TILE_ID_C: TileId = 256;
pub const TILE_ID_D: TileId = 512;
pub const TILE_ID_E: TileId = 768;
pub const TILE_ID_A5: TileId = 1536;
pub const TILE_ID_A1: TileId = 2048;
pub const TILE_ID_A2: TileId = 2816;
pub const TILE_ID_A3: TileId = 4352;
pub const TILE_ID_A4: TileId = 5888;
pub const TILE_ID_MAX: TileId = 8192;

/// The empty tile. Writing it clears a layer.
pub const EMPTY_TILE: TileId = 0;

/// Number of tile IDs reserved for each autotile family
pub const AUTOTILE_STRIDE: TileId = 48;

/// Get the autotile family index of a tile, or `None` if it is not an autotile
pub fn autotile_kind(tile_id: TileId) -> Option<u32> {
    if (TILE_ID_A1..TILE_ID_MAX).contains(&tile_id) {
        Some((tile_id - TILE_ID_A1) / AUTOTILE_STRIDE)
    } else {
        None
    }
}

/// First tile ID (shape 0) of an autotile family
pub fn autotile_base(kind: u32) -> TileId {
    TILE_ID_A1 + kind * AUTOTILE_STRIDE
}

/// Shape variant of an autotile within its family
pub fn autotile_shape(tile_id: TileId) -> Option<u32> {
    autotile_kind(tile_id).map(|kind| tile_id - autotile_base(kind))
}

/// Check whether two tile IDs match for filtering purposes.
///
/// Identical IDs always match. Two autotiles also match when they belong to the
/// same family, whatever shape each currently shows, so a filter naming one water
/// tile picks up every shape of that water.
pub fn is_tile_match(a: TileId, b: TileId) -> bool {
    if a == b {
        return true;
    }
    matches!((autotile_kind(a), autotile_kind(b)), (Some(ka), Some(kb)) if ka == kb)
}
