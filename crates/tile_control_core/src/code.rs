//! Tile codes: human-facing names for tile IDs
//!
//! A tile code is a sheet letter followed by either `col,row` on an 8-wide
//! selector grid (`"A3,1"`, `"B0,2"`) or a flat index (`"A11"`, `"B16"`).
//! Sheet `A` spans all five A sub-sheets: flat indices below 128 name autotile
//! families on A1-A4, indices from 128 name A5 tiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::tile_id::*;

/// Code returned for tile IDs outside every sheet
pub const UNKNOWN_TILE_CODE: &str = "?";

const TILE_SELECTOR_ROW_SIZE: u32 = 8;

/// First flat code number of the A5 sub-sheet; lower numbers are A1-A4 families
const FIRST_A5_CODE_NUMBER: u32 = 128;

/// Errors from parsing a tile code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileCodeError {
    #[error("Tile code is empty")]
    Empty,
    #[error("Unknown tile sheet letter '{0}'")]
    UnknownSheet(char),
    #[error("Malformed tile code '{0}'")]
    Malformed(String),
    #[error("Tile code '{code}' is outside sheet {sheet}")]
    OutOfRange { code: String, sheet: char },
}

/// Convert a tile code (or a plain numeric tile ID) to a tile ID
pub fn decode_tile_code(code: &str) -> Result<TileId, TileCodeError> {
    let code = code.trim();
    let mut chars = code.chars();
    let letter = chars.next().ok_or(TileCodeError::Empty)?;

    if letter.is_ascii_digit() {
        return code
            .parse()
            .map_err(|_| TileCodeError::Malformed(code.to_string()));
    }

    let number = parse_code_number(chars.as_str())
        .ok_or_else(|| TileCodeError::Malformed(code.to_string()))?;
    let letter = letter.to_ascii_lowercase();

    // (first tile id, capacity) of the sheet the number indexes into
    let (first, capacity) = match letter {
        'a' if number < FIRST_A5_CODE_NUMBER => {
            return Ok(autotile_base(number));
        }
        'a' => {
            return checked_offset(TILE_ID_A5, TILE_ID_A1 - TILE_ID_A5, number - FIRST_A5_CODE_NUMBER)
                .ok_or_else(|| out_of_range(code, letter));
        }
        'b' => (TILE_ID_B, TILE_ID_C - TILE_ID_B),
        'c' => (TILE_ID_C, TILE_ID_D - TILE_ID_C),
        'd' => (TILE_ID_D, TILE_ID_E - TILE_ID_D),
        'e' => (TILE_ID_E, TILE_ID_A5 - TILE_ID_E),
        other => return Err(TileCodeError::UnknownSheet(other)),
    };

    checked_offset(first, capacity, number).ok_or_else(|| out_of_range(code, letter))
}

/// Convert a tile ID to its `"{Sheet}{col},{row}"` code.
///
/// Autotile shape variants all encode to their family's code. IDs outside every
/// sheet encode to [`UNKNOWN_TILE_CODE`].
pub fn encode_tile_code(tile_id: TileId) -> String {
    let (letter, number) = match tile_id {
        id if id >= TILE_ID_MAX => {
            warn!("Unexpected tile ID: {}", id);
            return UNKNOWN_TILE_CODE.to_string();
        }
        id if id >= TILE_ID_A1 => ('A', (id - TILE_ID_A1) / AUTOTILE_STRIDE),
        id if id >= TILE_ID_A5 => ('A', id - TILE_ID_A5 + FIRST_A5_CODE_NUMBER),
        id if id >= TILE_ID_E => ('E', id - TILE_ID_E),
        id if id >= TILE_ID_D => ('D', id - TILE_ID_D),
        id if id >= TILE_ID_C => ('C', id - TILE_ID_C),
        id => ('B', id - TILE_ID_B),
    };
    format!(
        "{}{},{}",
        letter,
        number % TILE_SELECTOR_ROW_SIZE,
        number / TILE_SELECTOR_ROW_SIZE
    )
}

fn parse_code_number(rest: &str) -> Option<u32> {
    match rest.split_once(',') {
        Some((col, row)) => {
            let col: u32 = col.trim().parse().ok()?;
            let row: u32 = row.trim().parse().ok()?;
            if col >= TILE_SELECTOR_ROW_SIZE {
                return None;
            }
            row.checked_mul(TILE_SELECTOR_ROW_SIZE)?.checked_add(col)
        }
        None => rest.trim().parse().ok(),
    }
}

fn checked_offset(first: TileId, capacity: u32, number: u32) -> Option<TileId> {
    (number < capacity).then_some(first + number)
}

fn out_of_range(code: &str, letter: char) -> TileCodeError {
    TileCodeError::OutOfRange {
        code: code.to_string(),
        sheet: letter.to_ascii_uppercase(),
    }
}

/// A tile given either as an exact tile ID or as a tile code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileRef {
    Id(TileId),
    Code(String),
}

impl TileRef {
    /// Resolve to a tile ID, reporting malformed codes
    pub fn try_resolve(&self) -> Result<TileId, TileCodeError> {
        match self {
            TileRef::Id(id) => Ok(*id),
            TileRef::Code(code) => decode_tile_code(code),
        }
    }

    /// Resolve to a tile ID, logging malformed codes and returning `None` for them
    pub fn resolve_or_warn(&self) -> Option<TileId> {
        match self.try_resolve() {
            Ok(tile_id) => Some(tile_id),
            Err(err) => {
                warn!("{}; no tile will be placed", err);
                None
            }
        }
    }
}

impl From<TileId> for TileRef {
    fn from(id: TileId) -> Self {
        TileRef::Id(id)
    }
}

impl From<&str> for TileRef {
    fn from(code: &str) -> Self {
        TileRef::Code(code.to_string())
    }
}

impl From<String> for TileRef {
    fn from(code: String) -> Self {
        TileRef::Code(code)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileRef::Id(id) => write!(f, "{}", id),
            TileRef::Code(code) => f.write_str(code),
        }
    }
}
