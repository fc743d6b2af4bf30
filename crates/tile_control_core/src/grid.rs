//! Grid access traits shared by the shaping and fill engines

use crate::error::TileError;
use crate::map::{MapData, CHANNEL_COUNT, REGION_LAYER};
use crate::tile_id::{autotile_kind, TileId};

/// Read access to a tile grid
pub trait TileSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Tile at `(x, y, z)`; 0 outside the grid
    fn tile_id(&self, x: i32, y: i32, z: usize) -> TileId;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    fn region_id(&self, x: i32, y: i32) -> u32 {
        self.tile_id(x, y, REGION_LAYER)
    }

    /// Autotile family at a cell, if the cell holds an autotile
    fn autotile_kind_at(&self, x: i32, y: i32, z: usize) -> Option<u32> {
        autotile_kind(self.tile_id(x, y, z))
    }
}

/// Write access to a tile grid.
///
/// Implementations decide what makes a write acceptable: a bare [`MapData`]
/// only checks bounds, an editing session also checks sheet presence and
/// records the change.
pub trait TileSink: TileSource {
    /// Store a tile exactly as given, with no autotile shaping
    fn write_exact(&mut self, x: i32, y: i32, z: usize, tile_id: TileId) -> Result<(), TileError>;
}

impl TileSource for MapData {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn tile_id(&self, x: i32, y: i32, z: usize) -> TileId {
        MapData::tile_id(self, x, y, z)
    }
}

impl TileSink for MapData {
    fn write_exact(&mut self, x: i32, y: i32, z: usize, tile_id: TileId) -> Result<(), TileError> {
        let out_of_bounds = TileError::OutOfBounds {
            x,
            y,
            z,
            width: self.width,
            height: self.height,
        };
        let index = self.index(x, y, z).ok_or(out_of_bounds.clone())?;
        if self.set_index(index, tile_id) {
            Ok(())
        } else {
            Err(out_of_bounds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_data_write_exact() {
        let mut map = MapData::new(3, 3, 1);
        map.write_exact(2, 1, 3, 2100).unwrap();
        assert_eq!(TileSource::tile_id(&map, 2, 1, 3), 2100);
        assert_eq!(map.autotile_kind_at(2, 1, 3), Some(1));
    }

    #[test]
    fn test_map_data_write_out_of_bounds() {
        let mut map = MapData::new(3, 3, 1);
        let before = map.clone();
        assert!(matches!(
            map.write_exact(3, 0, 0, 5),
            Err(TileError::OutOfBounds { x: 3, .. })
        ));
        assert!(map.write_exact(0, 0, CHANNEL_COUNT, 5).is_err());
        assert!(map.write_exact(-1, -1, 0, 5).is_err());
        assert_eq!(map, before);
    }
}
