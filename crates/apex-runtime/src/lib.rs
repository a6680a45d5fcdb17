//! Apex Runtime - game loop infrastructure
//!
//! Provides the building blocks the race screen ticks every frame:
//! - `GameClock` — fixed-timestep accumulator for deterministic physics
//! - `InputSnapshot` / `InputSource` / `InputDevice` — per-frame control
//!   state, produced by interchangeable strategies over an abstract device

mod clock;
mod input;

pub use clock::{GameClock, MAX_FRAME_TIME};
pub use input::{
    normalize_direction, select_source, GestureSource, InputDevice, InputSnapshot, InputSource,
    Key, KeypadTiltSource, Pointer, MAX_TILT, PANNING_AREA, PANNING_SENSITIVITY,
};
