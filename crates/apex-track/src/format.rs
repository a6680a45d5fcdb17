//! Track loading from TOML files

use crate::map::{TileDef, TrackMap};
use apex_core::{ApexError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root structure of a track TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackFile {
    pub track: TrackMetadata,
    #[serde(default)]
    pub tiles: Vec<TileEntry>,
}

/// Track metadata and tile grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub name: String,
    /// Tile size in map pixels
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tile id rows, top row first as laid out visually
    pub rows: Vec<Vec<u32>>,
}

/// Definition of a tile kind in a track file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileEntry {
    pub id: u32,
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub finish: bool,
}

/// Load a track from a TOML file
pub fn load_track<P: AsRef<Path>>(path: P) -> Result<TrackMap> {
    let content = fs::read_to_string(path)?;
    load_track_str(&content)
}

/// Load a track from a TOML string
pub fn load_track_str(content: &str) -> Result<TrackMap> {
    let file: TrackFile = toml::from_str(content)?;
    track_from_file(&file)
}

fn track_from_file(file: &TrackFile) -> Result<TrackMap> {
    let rows = file.track.rows.len();
    let cols = file.track.rows.first().map(|r| r.len()).unwrap_or(0);
    if file.track.rows.iter().any(|r| r.len() != cols) {
        return Err(ApexError::TrackError(format!(
            "track '{}' has ragged grid rows",
            file.track.name
        )));
    }

    // File rows are listed top-to-bottom; the map stores the bottom row first
    let cells = file.track.rows.iter().rev().flatten().copied().collect();
    let defs = file
        .tiles
        .iter()
        .map(|t| TileDef {
            id: t.id,
            start: t.start,
            finish: t.finish,
        })
        .collect();

    TrackMap::new(
        cols,
        rows,
        file.track.tile_width,
        file.track.tile_height,
        cells,
        defs,
    )
}
