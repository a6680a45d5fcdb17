//! In-memory track map

use apex_core::{ApexError, Result, Vec2};
use std::collections::HashMap;

/// World units per map pixel: 16 pixels make one world unit
pub const UNIT_FOR_PIXEL: f32 = 1.0 / 16.0;

/// Properties of one tile kind
#[derive(Debug, Clone, Default)]
pub struct TileDef {
    pub id: u32,
    /// Car spawn anchor. A valid track carries exactly one tile with this set.
    pub start: bool,
    /// Part of the finish region
    pub finish: bool,
}

/// An immutable grid of tiles
///
/// Cells are stored row-major with row 0 at the bottom and the y axis
/// pointing up, matching the world coordinate system.
pub struct TrackMap {
    cols: usize,
    rows: usize,
    /// Tile size in map pixels
    tile_width: u32,
    tile_height: u32,
    cells: Vec<u32>,
    defs: HashMap<u32, TileDef>,
}

impl TrackMap {
    /// Build a track from raw grid data
    ///
    /// `cells` is row-major, bottom row first. Every id referenced by a cell
    /// must have a matching `TileDef`.
    pub fn new(
        cols: usize,
        rows: usize,
        tile_width: u32,
        tile_height: u32,
        cells: Vec<u32>,
        defs: Vec<TileDef>,
    ) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(ApexError::TrackError("track grid is empty".into()));
        }
        if cells.len() != cols * rows {
            return Err(ApexError::TrackError(format!(
                "grid has {} cells, expected {}x{} = {}",
                cells.len(),
                cols,
                rows,
                cols * rows
            )));
        }
        let defs: HashMap<u32, TileDef> = defs.into_iter().map(|d| (d.id, d)).collect();
        if let Some(id) = cells.iter().find(|id| !defs.contains_key(*id)) {
            return Err(ApexError::TrackError(format!(
                "grid references undefined tile id {}",
                id
            )));
        }
        Ok(Self {
            cols,
            rows,
            tile_width,
            tile_height,
            cells,
            defs,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Tile width in world units
    pub fn tile_width_u(&self) -> f32 {
        UNIT_FOR_PIXEL * self.tile_width as f32
    }

    /// Tile height in world units
    pub fn tile_height_u(&self) -> f32 {
        UNIT_FOR_PIXEL * self.tile_height as f32
    }

    /// Map width in world units
    pub fn width_u(&self) -> f32 {
        self.tile_width_u() * self.cols as f32
    }

    /// Map height in world units
    pub fn height_u(&self) -> f32 {
        self.tile_height_u() * self.rows as f32
    }

    /// Tile at grid coordinates, row 0 at the bottom
    pub fn tile_at(&self, col: usize, row: usize) -> Option<&TileDef> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.defs.get(&self.cells[row * self.cols + col])
    }

    /// Tile under a world-space point
    pub fn tile_under(&self, pos: Vec2) -> Option<&TileDef> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / self.tile_width_u()) as usize;
        let row = (pos.y / self.tile_height_u()) as usize;
        self.tile_at(col, row)
    }

    /// World-space center of the start tile
    ///
    /// Returns `None` (after logging an error) when the track has no start
    /// tile; the caller decides whether that is fatal. With more than one
    /// start tile the first in row-major order wins.
    pub fn start_position(&self) -> Option<Vec2> {
        let mut found = None;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let is_start = self
                    .tile_at(col, row)
                    .map(|t| t.start)
                    .unwrap_or(false);
                if !is_start {
                    continue;
                }
                if found.is_some() {
                    log::warn!("track has more than one start tile, using the first");
                    return found;
                }
                let tw = self.tile_width_u();
                let th = self.tile_height_u();
                found = Some(Vec2::new(
                    col as f32 * tw + tw / 2.0,
                    row as f32 * th + th / 2.0,
                ));
            }
        }
        if found.is_none() {
            log::error!("no tile with a start marker found");
        }
        found
    }

    /// Is the given world-space point inside the finish region?
    pub fn is_finish_at(&self, pos: Vec2) -> bool {
        self.tile_under(pos).map(|t| t.finish).unwrap_or(false)
    }

    /// Check the track satisfies the simulation's configuration contract
    pub fn validate(&self) -> Result<()> {
        let starts = self
            .cells
            .iter()
            .filter(|id| self.defs.get(*id).map(|d| d.start).unwrap_or(false))
            .count();
        if starts == 0 {
            return Err(ApexError::TrackError("track has no start tile".into()));
        }
        if starts > 1 {
            return Err(ApexError::TrackError(format!(
                "track has {} start tiles, expected exactly one",
                starts
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<TileDef> {
        vec![
            TileDef {
                id: 1,
                ..Default::default()
            },
            TileDef {
                id: 2,
                start: true,
                ..Default::default()
            },
            TileDef {
                id: 3,
                finish: true,
                ..Default::default()
            },
        ]
    }

    fn track() -> TrackMap {
        // bottom row: [1, 2, 1], top row: [1, 3, 1]
        TrackMap::new(3, 2, 32, 32, vec![1, 2, 1, 1, 3, 1], defs()).unwrap()
    }

    #[test]
    fn test_world_dimensions() {
        let t = track();
        assert!((t.tile_width_u() - 2.0).abs() < 1e-6);
        assert!((t.width_u() - 6.0).abs() < 1e-6);
        assert!((t.height_u() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_start_position_is_tile_center() {
        let t = track();
        let start = t.start_position().unwrap();
        assert!((start.x - 3.0).abs() < 1e-6);
        assert!((start.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_start_is_none() {
        let defs = vec![TileDef {
            id: 1,
            ..Default::default()
        }];
        let t = TrackMap::new(2, 2, 32, 32, vec![1, 1, 1, 1], defs).unwrap();
        assert!(t.start_position().is_none());
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_finish_query() {
        let t = track();
        // center of the finish tile (col 1, row 1)
        assert!(t.is_finish_at(Vec2::new(3.0, 3.0)));
        assert!(!t.is_finish_at(Vec2::new(3.0, 1.0)));
        // out of bounds
        assert!(!t.is_finish_at(Vec2::new(-1.0, 1.0)));
        assert!(!t.is_finish_at(Vec2::new(100.0, 1.0)));
    }

    #[test]
    fn test_rejects_malformed_grids() {
        assert!(TrackMap::new(0, 2, 32, 32, vec![], defs()).is_err());
        assert!(TrackMap::new(2, 2, 32, 32, vec![1, 2, 1], defs()).is_err());
        assert!(TrackMap::new(2, 2, 32, 32, vec![1, 2, 1, 9], defs()).is_err());
    }

    #[test]
    fn test_validate_flags_duplicate_starts() {
        let t = TrackMap::new(2, 1, 32, 32, vec![2, 2], defs()).unwrap();
        assert!(t.validate().is_err());
        // lookup still succeeds with the first
        let start = t.start_position().unwrap();
        assert!((start.x - 1.0).abs() < 1e-6);
    }
}
