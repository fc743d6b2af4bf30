//! Forgiving deserializers for host-supplied parameters
//!
//! Host command arguments arrive as a mix of JSON booleans, numbers and their
//! string spellings (`"true"`, `"3"`, `""`). These helpers are used with
//! `#[serde(deserialize_with = "...")]` so the typed request structs only ever
//! hold booleans, integers and options.
//!
//! Unparseable values never fail deserialization; they fall back to the
//! field's neutral value (false, 0, `None`, empty list).

use serde::{Deserialize, Deserializer};

use crate::code::TileRef;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Loose>),
    Other(serde::de::IgnoredAny),
}

impl Loose {
    fn as_bool(&self) -> bool {
        match self {
            Loose::Bool(b) => *b,
            Loose::Text(s) => s.trim() == "true",
            _ => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Loose::Int(n) => Some(*n as f64),
            Loose::Float(f) if f.is_finite() => Some(*f),
            Loose::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    fn as_rounded(&self) -> Option<i64> {
        self.as_number().map(|f| f.round() as i64)
    }

    fn is_blank(&self) -> bool {
        match self {
            Loose::Text(s) => s.trim().is_empty(),
            Loose::Other(_) => true,
            _ => false,
        }
    }

    fn into_tile(self) -> Option<TileRef> {
        match self {
            Loose::Int(n) => u32::try_from(n).ok().map(TileRef::Id),
            Loose::Text(s) if !s.trim().is_empty() => Some(TileRef::Code(s.trim().to_string())),
            _ => None,
        }
    }

    /// Flatten nested lists (and, with `split_commas`, comma-separated strings)
    /// into single items
    fn into_items(self, split_commas: bool) -> Vec<Loose> {
        match self {
            Loose::List(items) => items
                .into_iter()
                .flat_map(|item| item.into_items(split_commas))
                .collect(),
            Loose::Text(s) if s.trim_start().starts_with('[') => {
                match serde_json::from_str::<Loose>(&s) {
                    Ok(inner @ Loose::List(_)) => inner.into_items(split_commas),
                    _ => Vec::new(),
                }
            }
            Loose::Text(s) if !split_commas => vec![Loose::Text(s)],
            Loose::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Loose::Text(part.to_string()))
                .collect(),
            Loose::Other(_) => Vec::new(),
            other => vec![other],
        }
    }
}

/// `true` or `"true"`; anything else is false
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Loose::deserialize(deserializer)?.as_bool())
}

/// A free-form option name. Numbers and booleans are spelled out; anything else is empty.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Int(n) => n.to_string(),
        Loose::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// A map coordinate or offset. Fractions are rounded; garbage is 0.
pub fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Loose::deserialize(deserializer)?
        .as_rounded()
        .map(|n| n.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        .unwrap_or(0))
}

/// A non-negative count such as a distance. Negative or garbage is 0.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Loose::deserialize(deserializer)?
        .as_rounded()
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0))
}

/// A layer index; garbage or negative is layer 0
pub fn layer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(Loose::deserialize(deserializer)?
        .as_rounded()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0))
}

/// A layer index that may be left blank
pub fn optional_layer<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    let value = Loose::deserialize(deserializer)?;
    if value.is_blank() {
        return Ok(None);
    }
    Ok(value.as_rounded().and_then(|n| usize::try_from(n).ok()))
}

/// A tile ID or tile code that may be left blank
pub fn optional_tile<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TileRef>, D::Error> {
    Ok(Loose::deserialize(deserializer)?.into_tile())
}

/// A list of tile IDs or codes: a JSON array, a JSON array encoded as a string,
/// or a single code. Commas are part of `col,row` codes, so plain strings are
/// never split.
pub fn tile_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TileRef>, D::Error> {
    Ok(Loose::deserialize(deserializer)?
        .into_items(false)
        .into_iter()
        .filter_map(|item| match item {
            // Numeric strings stay codes; the codec passes them through as IDs
            Loose::Float(f) if f.is_finite() && f >= 0.0 => Some(TileRef::Id(f.round() as u32)),
            other => other.into_tile(),
        })
        .collect())
}

/// A list of unsigned integers such as region IDs: a JSON array, a JSON array
/// encoded as a string, or a comma-separated string. Unparseable entries are dropped.
pub fn u32_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
    Ok(Loose::deserialize(deserializer)?
        .into_items(true)
        .iter()
        .filter_map(Loose::as_rounded)
        .filter_map(|n| u32::try_from(n).ok())
        .collect())
}
