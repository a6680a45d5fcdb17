//! Apex Game - the race screen core
//!
//! Ties the runtime pieces into one per-frame loop:
//! - `RaceScreen` — accumulate time, run fixed physics steps, update the
//!   car, check its state, poll input, produce a `FrameOutput`
//! - `CameraController` — look-ahead viewport clamped to the track
//! - `format_race_time` — the HUD clock string
//!
//! Drawing itself stays outside: the screen hands the backend a viewport
//! transform, the car pose, and optional debug overlay data.

mod camera;
mod hud;
mod render;
mod screen;

pub use camera::{CameraController, CarPose, VIEWPORT_WIDTH};
pub use hud::format_race_time;
pub use render::{DebugOverlay, FrameOutput, RaceOutcome, Viewport};
pub use screen::{RaceScreen, ScreenConfig};
