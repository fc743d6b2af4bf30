//! Shape tables for the three autotile families
//!
//! Shapes are computed from a neighbour bitmask: a bit is set when the
//! neighbour in that direction belongs to the same family.

use crate::family::AutotileFamily;

/// Neighbour direction flags for bitmask calculation
pub mod neighbors {
    pub const N: u8 = 0b0000_0001;
    pub const NE: u8 = 0b0000_0010;
    pub const E: u8 = 0b0000_0100;
    pub const SE: u8 = 0b0000_1000;
    pub const S: u8 = 0b0001_0000;
    pub const SW: u8 = 0b0010_0000;
    pub const W: u8 = 0b0100_0000;
    pub const NW: u8 = 0b1000_0000;

    /// Every direction matching: the interior of a large area
    pub const ALL: u8 = 0xFF;
}

/// Build a neighbour bitmask for the cell at `(x, y)`.
///
/// Unlike blob-style autotiling the corners are kept as-is; the 47-shape table
/// ignores corners that its cardinal case does not use.
pub fn calculate_bitmask<F>(x: i32, y: i32, is_same_family: F) -> u8
where
    F: Fn(i32, i32) -> bool,
{
    use neighbors::*;

    let offsets = [
        (0, -1, N),
        (1, -1, NE),
        (1, 0, E),
        (1, 1, SE),
        (0, 1, S),
        (-1, 1, SW),
        (-1, 0, W),
        (-1, -1, NW),
    ];

    offsets
        .into_iter()
        .filter(|&(dx, dy, _)| is_same_family(x + dx, y + dy))
        .fold(0, |mask, (_, _, bit)| mask | bit)
}

/// Shape offset within a family for the given neighbour bitmask
pub fn shape_for(family: AutotileFamily, mask: u8) -> u32 {
    match family {
        AutotileFamily::Standard => standard_shape(mask),
        AutotileFamily::Building => building_shape(mask),
        AutotileFamily::Waterfall => waterfall_shape(mask),
    }
}

/// 47-shape corner/edge table.
///
/// The cardinal neighbours pick a band (16, 4, 2 or 1 shapes wide); corners
/// that sit between two matching cardinals refine the shape within the band.
/// Shape 47 is never produced; it duplicates 46.
pub fn standard_shape(mask: u8) -> u32 {
    use neighbors::*;

    let has = |bit: u8| mask & bit != 0;
    // Adds `value` when the corner does not match
    let open = |bit: u8, value: u32| if has(bit) { 0 } else { value };

    match (has(N), has(E), has(S), has(W)) {
        (true, true, true, true) => open(NW, 1) + open(NE, 2) + open(SE, 4) + open(SW, 8),
        (true, true, true, false) => 16 + open(NE, 1) + open(SE, 2),
        (false, true, true, true) => 20 + open(SE, 1) + open(SW, 2),
        (true, false, true, true) => 24 + open(SW, 1) + open(NW, 2),
        (true, true, false, true) => 28 + open(NW, 1) + open(NE, 2),
        (true, false, true, false) => 32,
        (false, true, false, true) => 33,
        (false, true, true, false) => 34 + open(SE, 1),
        (false, false, true, true) => 36 + open(SW, 1),
        (true, false, false, true) => 38 + open(NW, 1),
        (true, true, false, false) => 40 + open(NE, 1),
        (false, false, true, false) => 42,
        (false, true, false, false) => 43,
        (true, false, false, false) => 44,
        (false, false, false, true) => 45,
        (false, false, false, false) => 46,
    }
}

/// 16-shape NESW table for roofs and walls: one bit per unmatched side
pub fn building_shape(mask: u8) -> u32 {
    use neighbors::*;

    [(W, 1), (N, 2), (E, 4), (S, 8)]
        .into_iter()
        .filter(|&(bit, _)| mask & bit == 0)
        .map(|(_, value)| value)
        .sum()
}

/// 4-shape waterfall table, driven only by the east and west neighbours
pub fn waterfall_shape(mask: u8) -> u32 {
    use neighbors::*;

    match (mask & E != 0, mask & W != 0) {
        (true, true) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::neighbors::*;
    use super::*;

    #[test]
    fn test_bitmask_directions() {
        // Only the cell north-east of (5, 5) matches
        let mask = calculate_bitmask(5, 5, |x, y| x == 6 && y == 4);
        assert_eq!(mask, NE);

        let mask = calculate_bitmask(0, 0, |x, y| x < 0 || y < 0);
        assert_eq!(mask, N | NE | NW | W | SW);
    }

    #[test]
    fn test_standard_interior_and_isolated() {
        assert_eq!(standard_shape(ALL), 0);
        assert_eq!(standard_shape(0), 46);
        // Corners alone never refine an isolated tile
        assert_eq!(standard_shape(NE | SE | SW | NW), 46);
    }

    #[test]
    fn test_standard_inner_corners() {
        assert_eq!(standard_shape(ALL & !NW), 1);
        assert_eq!(standard_shape(ALL & !NE), 2);
        assert_eq!(standard_shape(ALL & !SE), 4);
        assert_eq!(standard_shape(ALL & !SW), 8);
        assert_eq!(standard_shape(N | E | S | W), 15);
    }

    #[test]
    fn test_standard_edges() {
        assert_eq!(standard_shape(ALL & !W), 16);
        assert_eq!(standard_shape(N | E | S), 19);
        assert_eq!(standard_shape(ALL & !N), 20);
        assert_eq!(standard_shape(ALL & !E), 24);
        assert_eq!(standard_shape(ALL & !S), 28);
        assert_eq!(standard_shape(N | S), 32);
        assert_eq!(standard_shape(E | W), 33);
    }

    #[test]
    fn test_standard_outer_corners_and_ends() {
        assert_eq!(standard_shape(E | S | SE), 34);
        assert_eq!(standard_shape(E | S), 35);
        assert_eq!(standard_shape(S | W | SW), 36);
        assert_eq!(standard_shape(N | W), 39);
        assert_eq!(standard_shape(N | E | NE), 40);
        assert_eq!(standard_shape(S), 42);
        assert_eq!(standard_shape(E), 43);
        assert_eq!(standard_shape(N), 44);
        assert_eq!(standard_shape(W), 45);
    }

    #[test]
    fn test_standard_shapes_cover_table() {
        let mut seen = [false; 47];
        for mask in 0..=u8::MAX {
            let shape = standard_shape(mask);
            assert!(shape < 47, "mask {mask:#010b} gave {shape}");
            seen[shape as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_building_shape() {
        assert_eq!(building_shape(ALL), 0);
        assert_eq!(building_shape(0), 15);
        assert_eq!(building_shape(N | E | S), 1);
        assert_eq!(building_shape(E | S | W), 2);
        assert_eq!(building_shape(N | S | W), 4);
        assert_eq!(building_shape(N | E | W), 8);
        // Corners are irrelevant
        assert_eq!(building_shape(N | E | S | W), 0);
    }

    #[test]
    fn test_waterfall_shape() {
        assert_eq!(waterfall_shape(E | W), 0);
        assert_eq!(waterfall_shape(E | N | S), 1);
        assert_eq!(waterfall_shape(W), 2);
        assert_eq!(waterfall_shape(N | S), 3);
    }

    #[test]
    fn test_shape_for_dispatch() {
        assert_eq!(shape_for(AutotileFamily::Standard, 0), 46);
        assert_eq!(shape_for(AutotileFamily::Building, 0), 15);
        assert_eq!(shape_for(AutotileFamily::Waterfall, 0), 3);
    }
}
