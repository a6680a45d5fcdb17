//! Camera following the car over the track

use apex_core::Vec2;

/// Viewport width in world units, fixed across aspect ratios
pub const VIEWPORT_WIDTH: f32 = 40.0;

/// Car pose as the camera and draw backend consume it, read after the
/// world step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarPose {
    pub position: Vec2,
    /// Heading in degrees counter-clockwise from +x
    pub angle: f32,
}

/// Follows the car with a fixed-width viewport
///
/// The camera keeps no momentum: `update` fully recomputes position and
/// viewport from the latest pose and screen size, so resizing never needs
/// interpolation.
pub struct CameraController {
    pub position: Vec2,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Scales the look-ahead lead. The lead is currently a pure function
    /// of pose; this hook is where speed scaling would plug in.
    pub lead_factor: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_WIDTH,
            lead_factor: 1.0,
        }
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute viewport and position. Runs on every render and on resize.
    pub fn update(
        &mut self,
        pose: CarPose,
        map_width: f32,
        map_height: f32,
        screen_width: f32,
        screen_height: f32,
    ) {
        self.viewport_width = VIEWPORT_WIDTH;
        self.viewport_height = VIEWPORT_WIDTH * screen_height / screen_width;

        // Focus a little ahead of the car along its heading
        let advance = self.lead_factor * self.viewport_width.min(self.viewport_height) / 3.0;
        let focus = pose.position + Vec2::from_angle_deg(pose.angle) * advance;

        self.position = Vec2::new(
            Self::clamp_axis(focus.x, self.viewport_width, map_width),
            Self::clamp_axis(focus.y, self.viewport_height, map_height),
        );
    }

    /// Keep the viewport on the map along one axis, or center the axis when
    /// the map is smaller than the viewport
    fn clamp_axis(focus: f32, extent: f32, map_extent: f32) -> f32 {
        if extent <= map_extent {
            focus.clamp(extent / 2.0, map_extent - extent / 2.0)
        } else {
            map_extent / 2.0
        }
    }
}
