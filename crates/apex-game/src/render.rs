//! Per-frame output handed to the draw backend

use crate::camera::CarPose;
use apex_core::Vec2;

/// The camera transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
    /// Extents in world units
    pub width: f32,
    pub height: f32,
}

/// Extra draw data emitted when `ScreenConfig::debug_overlay` is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOverlay {
    /// Grid line pitch in world units (one line per tile edge)
    pub tile_width: f32,
    pub tile_height: f32,
    pub map_width: f32,
    pub map_height: f32,
    /// Marker at the car body origin
    pub car_marker: Vec2,
}

/// How the race ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaceOutcome {
    /// The car broke; the screen owner shows the game-over overlay
    Wrecked,
    /// The car reached the finish; the owner shows the results overlay
    Finished { race_time: f64 },
}

/// Everything the draw backend needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub viewport: Viewport,
    pub car: CarPose,
    /// Elapsed race time formatted `M:SS.D`, refreshed once per frame
    pub hud_time: String,
    pub debug: Option<DebugOverlay>,
    /// Set from the frame a terminal car state is first observed onward
    pub outcome: Option<RaceOutcome>,
}
