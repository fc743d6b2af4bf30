//! Tileset configuration and tile sheet presence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::tile_id::*;

/// One of the nine image sheets a tileset can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSheet {
    A1,
    A2,
    A3,
    A4,
    A5,
    B,
    C,
    D,
    E,
}

impl TileSheet {
    /// All sheets in tileset slot order
    pub const ALL: [TileSheet; 9] = [
        TileSheet::A1,
        TileSheet::A2,
        TileSheet::A3,
        TileSheet::A4,
        TileSheet::A5,
        TileSheet::B,
        TileSheet::C,
        TileSheet::D,
        TileSheet::E,
    ];

    /// Find the sheet a tile ID is drawn from
    pub fn of(tile_id: TileId) -> Option<Self> {
        let sheet = match tile_id {
            id if id < TILE_ID_C => TileSheet::B,
            id if id < TILE_ID_D => TileSheet::C,
            id if id < TILE_ID_E => TileSheet::D,
            id if id < TILE_ID_A5 => TileSheet::E,
            id if id < TILE_ID_A1 => TileSheet::A5,
            id if id < TILE_ID_A2 => TileSheet::A1,
            id if id < TILE_ID_A3 => TileSheet::A2,
            id if id < TILE_ID_A4 => TileSheet::A3,
            id if id < TILE_ID_MAX => TileSheet::A4,
            _ => return None,
        };
        Some(sheet)
    }

    /// Index of this sheet in a tileset's image name list
    pub fn slot(self) -> usize {
        match self {
            TileSheet::A1 => 0,
            TileSheet::A2 => 1,
            TileSheet::A3 => 2,
            TileSheet::A4 => 3,
            TileSheet::A5 => 4,
            TileSheet::B => 5,
            TileSheet::C => 6,
            TileSheet::D => 7,
            TileSheet::E => 8,
        }
    }

    /// Display name of the sheet ("A1", "B", ...)
    pub fn name(self) -> &'static str {
        match self {
            TileSheet::A1 => "A1",
            TileSheet::A2 => "A2",
            TileSheet::A3 => "A3",
            TileSheet::A4 => "A4",
            TileSheet::A5 => "A5",
            TileSheet::B => "B",
            TileSheet::C => "C",
            TileSheet::D => "D",
            TileSheet::E => "E",
        }
    }

    /// Parse a sheet name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|sheet| sheet.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for TileSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tileset configuration: which image is assigned to each sheet slot.
///
/// Field names follow the host's `Tilesets.json` layout so entries can be
/// deserialized directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetConfig {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Image names in A1, A2, A3, A4, A5, B, C, D, E order. Empty means the sheet is absent.
    #[serde(default)]
    pub tileset_names: Vec<String>,
}

impl TilesetConfig {
    /// Create a tileset with every sheet slot empty
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tileset_names: vec![String::new(); TileSheet::ALL.len()],
        }
    }

    /// Assign an image to a sheet
    pub fn with_sheet(mut self, sheet: TileSheet, image: impl Into<String>) -> Self {
        self.set_sheet(sheet, image);
        self
    }

    /// Assign an image to a sheet, growing the slot list if it is short
    pub fn set_sheet(&mut self, sheet: TileSheet, image: impl Into<String>) {
        let slot = sheet.slot();
        if self.tileset_names.len() <= slot {
            self.tileset_names.resize(slot + 1, String::new());
        }
        self.tileset_names[slot] = image.into();
    }

    /// Get the image assigned to a sheet, if any
    pub fn sheet_image(&self, sheet: TileSheet) -> Option<&str> {
        self.tileset_names
            .get(sheet.slot())
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Check if the sheet has a non-empty image assigned
    pub fn sheet_present(&self, sheet: TileSheet) -> bool {
        self.sheet_image(sheet).is_some()
    }

    /// Check if a tile ID can be drawn with this tileset.
    ///
    /// The empty tile is always drawable.
    pub fn tile_id_exists(&self, tile_id: TileId) -> bool {
        if tile_id == EMPTY_TILE {
            return true;
        }
        TileSheet::of(tile_id).is_some_and(|sheet| self.sheet_present(sheet))
    }
}

/// All tilesets of a project, keyed by tileset ID
#[derive(Debug, Clone, Default)]
pub struct TilesetRegistry {
    tilesets: HashMap<u32, TilesetConfig>,
}

impl TilesetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the host's tileset list, which is a JSON array with `null` holes
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<Option<TilesetConfig>> = serde_json::from_str(json)?;
        Ok(entries.into_iter().flatten().collect())
    }

    /// Add or replace a tileset
    pub fn insert(&mut self, tileset: TilesetConfig) {
        self.tilesets.insert(tileset.id, tileset);
    }

    /// Builder-style insert
    pub fn with(mut self, tileset: TilesetConfig) -> Self {
        self.insert(tileset);
        self
    }

    /// Get a tileset by ID
    pub fn get(&self, id: u32) -> Option<&TilesetConfig> {
        self.tilesets.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tilesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilesets.is_empty()
    }
}

impl FromIterator<TilesetConfig> for TilesetRegistry {
    fn from_iter<I: IntoIterator<Item = TilesetConfig>>(iter: I) -> Self {
        let mut registry = TilesetRegistry::new();
        for tileset in iter {
            registry.insert(tileset);
        }
        registry
    }
}
