//! Apex Track - tile-grid track maps
//!
//! A track is an immutable grid of tiles with pixel dimensions, converted
//! once into world units. Tiles carry the markers the simulation cares
//! about: the single `start` spawn anchor and the `finish` region.
//!
//! - `TrackMap` / `TileDef` — the in-memory track
//! - `TrackFile` — TOML serialization, loaded via `load_track`

mod format;
mod map;

pub use format::{load_track, load_track_str, TileEntry, TrackFile, TrackMetadata};
pub use map::{TileDef, TrackMap, UNIT_FOR_PIXEL};
