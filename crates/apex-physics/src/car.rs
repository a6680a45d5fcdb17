//! The player car entity

use crate::world::PhysicsWorld;
use apex_core::{ApexError, Result, Vec2};
use apex_track::TrackMap;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

/// Heading at spawn, degrees counter-clockwise from +x
const SPAWN_ANGLE_DEG: f32 = 90.0;

/// Car lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarState {
    #[default]
    Running,
    /// Wrecked by impact damage. Terminal.
    Broken,
    /// Entered the finish region. Terminal.
    Finished,
}

impl CarState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CarState::Running)
    }

    /// Transition guard: terminal states never change again
    fn next(self, requested: CarState) -> CarState {
        if self.is_terminal() {
            self
        } else {
            requested
        }
    }
}

/// Car tuning, injected at construction and loadable from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Collider half-extents in world units
    pub half_length: f32,
    pub half_width: f32,
    pub density: f32,
    /// Forward drive force at full throttle
    pub engine_force: f32,
    /// Force opposing travel while braking
    pub brake_force: f32,
    /// Steering torque at full lock
    pub steer_torque: f32,
    /// Fraction of lateral velocity cancelled per second
    pub lateral_grip: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Single contact force magnitude that wrecks the car outright
    pub impact_threshold: f32,
    /// Cumulative wear budget for sub-threshold contacts
    pub max_damage: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            half_length: 0.8,
            half_width: 0.4,
            density: 1.0,
            engine_force: 40.0,
            brake_force: 60.0,
            steer_torque: 4.0,
            lateral_grip: 8.0,
            linear_damping: 0.5,
            angular_damping: 3.0,
            impact_threshold: 250.0,
            max_damage: 500.0,
        }
    }
}

impl CarConfig {
    /// Load tuning from a TOML string; omitted fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// The player car
///
/// The car exclusively owns its rigid body: all writes to the body go
/// through `act`, and every other component reads pose values only after
/// the world has stepped.
pub struct Car {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    state: CarState,
    config: CarConfig,
    direction: f32,
    accelerating: bool,
    braking: bool,
    /// Accumulated sub-threshold impact wear
    damage: f32,
}

impl Car {
    /// Spawn the car on the track's start tile
    ///
    /// Fails when the track has no start tile; there is no sane fallback
    /// position, so the screen must not come up at all.
    pub fn new(world: &mut PhysicsWorld, track: &TrackMap, config: CarConfig) -> Result<Self> {
        let start = track.start_position().ok_or_else(|| {
            ApexError::TrackError("cannot spawn car: track has no start tile".into())
        })?;

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![start.x, start.y])
            .rotation(SPAWN_ANGLE_DEG.to_radians())
            .linear_damping(config.linear_damping)
            .angular_damping(config.angular_damping)
            .build();
        let body = world.insert_rigid_body(body);

        let collider = ColliderBuilder::cuboid(config.half_length, config.half_width)
            .density(config.density)
            .active_events(ActiveEvents::CONTACT_FORCE_EVENTS)
            .contact_force_event_threshold(0.0)
            .build();
        let collider = world.insert_collider_with_parent(collider, body);

        Ok(Self {
            body,
            collider,
            state: CarState::Running,
            config,
            direction: 0.0,
            accelerating: false,
            braking: false,
            damage: 0.0,
        })
    }

    /// Steering input in [-1, 1], positive counter-clockwise. The input
    /// layer clamps before the value gets here.
    pub fn set_direction(&mut self, direction: f32) {
        self.direction = direction;
    }

    pub fn set_accelerating(&mut self, on: bool) {
        self.accelerating = on;
    }

    pub fn set_braking(&mut self, on: bool) {
        self.braking = on;
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    /// Accumulated wear in the current run
    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Per-frame update: impact detection, finish detection, control forces
    ///
    /// Call after the world has consumed its fixed steps for the frame. In a
    /// terminal state this is a no-op; the body settles under its damping.
    pub fn act(&mut self, world: &mut PhysicsWorld, track: &TrackMap, dt: f32) {
        if self.state.is_terminal() {
            return;
        }

        self.check_impacts(world, dt);

        if self.state == CarState::Running && track.is_finish_at(self.position(world)) {
            self.transition(CarState::Finished);
        }

        if self.state.is_terminal() {
            return;
        }
        self.apply_controls(world, dt);
    }

    fn check_impacts(&mut self, world: &mut PhysicsWorld, dt: f32) {
        for event in world.drain_contact_force_events() {
            if event.collider1 != self.collider && event.collider2 != self.collider {
                continue;
            }
            let magnitude = event.total_force_magnitude;
            if magnitude >= self.config.impact_threshold {
                self.transition(CarState::Broken);
            } else {
                self.damage += magnitude * dt;
                if self.damage >= self.config.max_damage {
                    self.transition(CarState::Broken);
                }
            }
        }
    }

    fn apply_controls(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let Some(body) = world.get_rigid_body_mut(self.body) else {
            return;
        };

        let angle = body.rotation().angle();
        let forward = vector![angle.cos(), angle.sin()];
        let velocity = *body.linvel();
        let mass = body.mass();

        if self.direction != 0.0 {
            body.apply_torque_impulse(self.direction * self.config.steer_torque * dt, true);
        }

        if self.accelerating {
            body.apply_impulse(forward * self.config.engine_force * dt, true);
        }

        if self.braking {
            let speed = velocity.norm();
            if speed > 0.1 {
                // Oppose travel without ever reversing it
                let impulse = (self.config.brake_force * dt).min(speed * mass);
                body.apply_impulse(-velocity / speed * impulse, true);
            }
        }

        // Kill side-slip so the car tracks its heading
        let lateral = vector![-forward.y, forward.x];
        let side_speed = velocity.dot(&lateral);
        let grip = (self.config.lateral_grip * dt).min(1.0);
        body.apply_impulse(-lateral * side_speed * grip * mass, true);
    }

    fn transition(&mut self, requested: CarState) {
        let next = self.state.next(requested);
        if next != self.state {
            log::info!("car state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// World-space position, read after the last step
    pub fn position(&self, world: &PhysicsWorld) -> Vec2 {
        world
            .get_rigid_body(self.body)
            .map(|b| Vec2::new(b.translation().x, b.translation().y))
            .unwrap_or(Vec2::ZERO)
    }

    /// Heading in degrees counter-clockwise from +x
    pub fn angle_deg(&self, world: &PhysicsWorld) -> f32 {
        world
            .get_rigid_body(self.body)
            .map(|b| b.rotation().angle().to_degrees())
            .unwrap_or(0.0)
    }

    /// Linear velocity in world units per second
    pub fn velocity(&self, world: &PhysicsWorld) -> Vec2 {
        world
            .get_rigid_body(self.body)
            .map(|b| Vec2::new(b.linvel().x, b.linvel().y))
            .unwrap_or(Vec2::ZERO)
    }
}
