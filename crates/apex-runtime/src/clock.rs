//! Game clock with fixed-timestep accumulator

/// Longest frame delta accepted per frame, in seconds. Slower frames are
/// clamped before accumulation so physics catch-up stays bounded.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks game time and provides a fixed-timestep accumulator for physics updates
pub struct GameClock {
    /// Total elapsed game time in seconds (clamped deltas)
    pub total_time: f64,
    /// Delta consumed by the last `advance` call, after clamping
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Accumulated time for fixed-step consumption
    accumulator: f64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
        }
    }
}

impl GameClock {
    /// Create a new game clock with the default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Feed one frame delta (seconds). Call once per frame.
    pub fn advance(&mut self, delta: f64) {
        let frame_time = delta.clamp(0.0, MAX_FRAME_TIME);
        self.delta_time = frame_time;
        self.total_time += frame_time;
        self.accumulator += frame_time;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }

    /// Most fixed steps a single frame can trigger, given the delta clamp
    pub fn max_steps_per_frame(&self) -> u32 {
        (MAX_FRAME_TIME / self.fixed_timestep) as u32
    }

    /// Get the interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator / self.fixed_timestep
    }
}
