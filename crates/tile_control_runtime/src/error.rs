//! Error type for editing-session operations

use thiserror::Error;

use crate::loader::MapLoadError;

/// Failures that abort an editing-session operation
#[derive(Debug, Error)]
pub enum TileControlError {
    #[error("Invalid map ID {0}: cannot link to it")]
    InvalidLinkTarget(i32),
    #[error("Failed to load map {map_id}: {source}")]
    MapLoad {
        map_id: i32,
        #[source]
        source: MapLoadError,
    },
}
