//! Input normalization
//!
//! Raw platform input stays outside this crate, abstracted behind
//! `InputDevice`. Interchangeable `InputSource` strategies turn the device
//! state into one `InputSnapshot` per frame:
//!
//! - `KeypadTiltSource` — steering from a tilt sensor or arrow keys, pedals
//!   from keys or half-screen touch bands
//! - `GestureSource` — the left part of the screen is a relative pan region
//!   owned by a single pointer, the rest is a fire button

/// Largest tilt angle considered for steering, in degrees
pub const MAX_TILT: f32 = 30.0;
/// Fraction of the screen (from the left) acting as the pan region
pub const PANNING_AREA: f32 = 0.7;
/// Scale applied to pan deltas before clamping
pub const PANNING_SENSITIVITY: f32 = 2.5;

/// Abstract control keys, bound to physical keys by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Accelerate,
    Brake,
}

/// One active touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: u64,
    /// Horizontal position as a fraction of screen width, in [0, 1]
    pub x: f32,
}

/// Raw device state, sampled by the platform layer once per frame
///
/// `active_pointers` replaces per-index touch polling: sources iterate
/// whatever pointers the device reports, with no assumed maximum count.
pub trait InputDevice {
    fn is_key_down(&self, key: Key) -> bool;
    /// Device tilt in degrees, when a tilt sensor exists
    fn tilt_angle(&self) -> Option<f32>;
    /// All currently active pointers
    fn active_pointers(&self) -> Vec<Pointer>;
    fn has_keyboard(&self) -> bool;
    fn has_touch(&self) -> bool;
}

/// Per-frame control state, rebuilt on every poll
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Steering in [-1, 1], positive steers counter-clockwise
    pub direction: f32,
    pub accelerating: bool,
    pub braking: bool,
    pub shooting: bool,
}

/// A control strategy producing one snapshot per frame
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;

    /// Human-readable strategy name
    fn name(&self) -> &str;
}

/// Clamp a raw steering value into the range the car accepts
///
/// Non-finite values collapse to neutral. The car entity never re-validates,
/// so every direction handed to it must pass through here.
pub fn normalize_direction(raw: f32) -> f32 {
    if !raw.is_finite() {
        log::warn!("discarding non-finite steering value");
        return 0.0;
    }
    raw.clamp(-1.0, 1.0)
}

/// Keyboard / tilt strategy
///
/// Steering comes from the tilt sensor when present (clamped to ±`MAX_TILT`
/// and normalized), otherwise from the arrow keys. Pedals respond to keys or
/// to touches in fixed half-screen bands: left half brakes, right half
/// accelerates.
pub struct KeypadTiltSource<D> {
    device: D,
}

impl<D: InputDevice> KeypadTiltSource<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    fn touch_between(&self, start_x: f32, end_x: f32) -> bool {
        self.device
            .active_pointers()
            .iter()
            .any(|p| p.x >= start_x && p.x <= end_x)
    }
}

impl<D: InputDevice> InputSource for KeypadTiltSource<D> {
    fn poll(&mut self) -> InputSnapshot {
        let direction = if let Some(angle) = self.device.tilt_angle() {
            normalize_direction(angle / MAX_TILT)
        } else if self.device.is_key_down(Key::Left) {
            1.0
        } else if self.device.is_key_down(Key::Right) {
            -1.0
        } else {
            0.0
        };

        InputSnapshot {
            direction,
            accelerating: self.device.is_key_down(Key::Accelerate) || self.touch_between(0.5, 1.0),
            braking: self.device.is_key_down(Key::Brake) || self.touch_between(0.0, 0.5),
            shooting: false,
        }
    }

    fn name(&self) -> &str {
        "keypad/tilt"
    }
}

/// Gesture strategy
///
/// The left `PANNING_AREA` fraction of the screen is a relative pan region:
/// steering is the scaled, clamped delta between the owning pointer's
/// current and initial x. Exactly one pointer owns the pan at a time;
/// ownership persists while the touch is held and frees on release. Touches
/// right of the pan region fire. Acceleration is always on: gesture mode has
/// no accelerate pedal, only the pan and fire regions matter.
pub struct GestureSource<D> {
    device: D,
    pan_pointer: Option<u64>,
    /// Pan anchor in pan-region coordinates (0 = left edge, 1 = region end)
    pan_start: f32,
}

impl<D: InputDevice> GestureSource<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            pan_pointer: None,
            pan_start: 0.0,
        }
    }

    fn update_panning(&mut self, pointers: &[Pointer], snapshot: &mut InputSnapshot) {
        let Some(id) = self.pan_pointer else {
            return;
        };
        match pointers.iter().find(|p| p.id == id) {
            Some(p) => {
                let x = p.x / PANNING_AREA;
                snapshot.direction = normalize_direction(-(x - self.pan_start) * PANNING_SENSITIVITY);
            }
            // Owner released: free the slot for the next qualifying touch
            None => self.pan_pointer = None,
        }
    }
}

impl<D: InputDevice> InputSource for GestureSource<D> {
    fn poll(&mut self) -> InputSnapshot {
        let mut snapshot = InputSnapshot {
            accelerating: true,
            ..Default::default()
        };

        let pointers = self.device.active_pointers();
        self.update_panning(&pointers, &mut snapshot);

        for p in &pointers {
            if Some(p.id) == self.pan_pointer {
                continue;
            }
            if p.x <= PANNING_AREA {
                if self.pan_pointer.is_none() {
                    self.pan_pointer = Some(p.id);
                    self.pan_start = p.x / PANNING_AREA;
                }
            } else {
                snapshot.shooting = true;
            }
        }
        snapshot
    }

    fn name(&self) -> &str {
        "gesture"
    }
}

/// Pick the input strategy matching a device's capabilities
///
/// Touch-only devices steer by gesture; anything with a keyboard (or tilt
/// sensor, which `KeypadTiltSource` prefers) uses the keypad/tilt strategy.
pub fn select_source<D: InputDevice + 'static>(device: D) -> Box<dyn InputSource> {
    if device.has_touch() && !device.has_keyboard() {
        Box::new(GestureSource::new(device))
    } else {
        Box::new(KeypadTiltSource::new(device))
    }
}
