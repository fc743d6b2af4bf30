//! Autotile family taxonomy
//!
//! Every autotile family index (`0..128`) maps to exactly one shape table.
//! The split follows the sheet layout:
//! - A1 kinds 4..16 with an odd index are waterfalls (4 shapes)
//! - A3 (kinds 48..80) are roofs and building walls (16 NESW shapes)
//! - A4 kinds whose row within the 16-kind block is the lower half are wall sides (16 NESW shapes)
//! - everything else uses the 47-shape corner/edge table

use serde::{Deserialize, Serialize};
use tile_control_core::{autotile_kind, TileId};

const FIRST_WATERFALL_KIND: u32 = 4;
const FIRST_A2_KIND: u32 = 16;
const FIRST_A3_KIND: u32 = 48;
const FIRST_A4_KIND: u32 = 80;

/// Which shape table an autotile family uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutotileFamily {
    /// 47 shapes driven by all 8 neighbours (ground, water, wall tops)
    Standard,
    /// 16 shapes driven by the 4 cardinal neighbours (roofs, building and wall sides)
    Building,
    /// 4 shapes driven by the east and west neighbours
    Waterfall,
}

impl AutotileFamily {
    /// Classify an autotile family index
    pub fn of_kind(kind: u32) -> Self {
        if (FIRST_WATERFALL_KIND..FIRST_A2_KIND).contains(&kind) && kind % 2 == 1 {
            AutotileFamily::Waterfall
        } else if (FIRST_A3_KIND..FIRST_A4_KIND).contains(&kind) || is_wall_side_kind(kind) {
            AutotileFamily::Building
        } else {
            AutotileFamily::Standard
        }
    }

    /// Classify a tile, or `None` if it is not an autotile
    pub fn of_tile(tile_id: TileId) -> Option<Self> {
        autotile_kind(tile_id).map(Self::of_kind)
    }

    /// Number of distinct shapes in this family's table
    pub fn shape_count(self) -> u32 {
        match self {
            AutotileFamily::Standard => 47,
            AutotileFamily::Building => 16,
            AutotileFamily::Waterfall => 4,
        }
    }
}

fn is_wall_side_kind(kind: u32) -> bool {
    kind >= FIRST_A4_KIND && kind % 16 >= 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a1_families() {
        // Sea, deep sea, rocks, ice
        for kind in 0..4 {
            assert_eq!(AutotileFamily::of_kind(kind), AutotileFamily::Standard);
        }
        assert_eq!(AutotileFamily::of_kind(4), AutotileFamily::Standard);
        assert_eq!(AutotileFamily::of_kind(5), AutotileFamily::Waterfall);
        assert_eq!(AutotileFamily::of_kind(7), AutotileFamily::Waterfall);
        assert_eq!(AutotileFamily::of_kind(15), AutotileFamily::Waterfall);
    }

    #[test]
    fn test_a2_is_standard() {
        for kind in 16..48 {
            assert_eq!(AutotileFamily::of_kind(kind), AutotileFamily::Standard);
        }
    }

    #[test]
    fn test_a3_is_building() {
        for kind in 48..80 {
            assert_eq!(AutotileFamily::of_kind(kind), AutotileFamily::Building);
        }
    }

    #[test]
    fn test_a4_alternates_tops_and_sides() {
        assert_eq!(AutotileFamily::of_kind(80), AutotileFamily::Standard);
        assert_eq!(AutotileFamily::of_kind(87), AutotileFamily::Standard);
        assert_eq!(AutotileFamily::of_kind(88), AutotileFamily::Building);
        assert_eq!(AutotileFamily::of_kind(95), AutotileFamily::Building);
        assert_eq!(AutotileFamily::of_kind(96), AutotileFamily::Standard);
        assert_eq!(AutotileFamily::of_kind(127), AutotileFamily::Building);
    }

    #[test]
    fn test_of_tile() {
        assert_eq!(AutotileFamily::of_tile(17), None);
        assert_eq!(AutotileFamily::of_tile(2048 + 5 * 48 + 3), Some(AutotileFamily::Waterfall));
        assert_eq!(AutotileFamily::of_tile(4352), Some(AutotileFamily::Building));
    }
}
