//! The race screen: per-frame orchestration
//!
//! Frame order is fixed: accumulate time, run the pending fixed physics
//! steps, update the car, check its state, poll input, recompute the
//! camera, assemble the frame output. Everything completes synchronously
//! before `render` returns; pose reads always happen after stepping.

use crate::camera::{CameraController, CarPose};
use crate::hud::format_race_time;
use crate::render::{DebugOverlay, FrameOutput, RaceOutcome, Viewport};
use apex_core::Result;
use apex_physics::{Car, CarConfig, CarState, PhysicsWorld, SolverConfig};
use apex_runtime::{normalize_direction, GameClock, InputSnapshot, InputSource};
use apex_track::TrackMap;

/// Screen-level options
#[derive(Debug, Clone, Default)]
pub struct ScreenConfig {
    /// Emit `DebugOverlay` data with every frame
    pub debug_overlay: bool,
    pub solver: SolverConfig,
}

/// One running race
pub struct RaceScreen {
    world: PhysicsWorld,
    track: TrackMap,
    car: Car,
    camera: CameraController,
    clock: GameClock,
    input: Box<dyn InputSource>,
    config: ScreenConfig,
    screen_width: f32,
    screen_height: f32,
    race_time: f64,
    outcome: Option<RaceOutcome>,
    last_input: InputSnapshot,
}

impl RaceScreen {
    /// Build a race on the given track
    ///
    /// Fails fast when the track cannot host a car (no start tile) rather
    /// than coming up with the car at an undefined position.
    pub fn new(
        track: TrackMap,
        car_config: CarConfig,
        config: ScreenConfig,
        input: Box<dyn InputSource>,
        screen_width: f32,
        screen_height: f32,
    ) -> Result<Self> {
        let mut world = PhysicsWorld::new(config.solver);
        let car = Car::new(&mut world, &track, car_config)?;

        let mut screen = Self {
            world,
            track,
            car,
            camera: CameraController::new(),
            clock: GameClock::new(),
            input,
            config,
            screen_width,
            screen_height,
            race_time: 0.0,
            outcome: None,
            last_input: InputSnapshot::default(),
        };
        screen.update_camera();
        Ok(screen)
    }

    /// Single per-frame entry point. `delta` is the frame time in seconds.
    pub fn render(&mut self, delta: f32) -> FrameOutput {
        self.clock.advance(delta as f64);
        while self.clock.should_fixed_update() {
            self.world.step(self.clock.fixed_timestep as f32);
            self.clock.consume_fixed_step();
        }

        self.car
            .act(&mut self.world, &self.track, self.clock.delta_time as f32);

        if self.outcome.is_none() {
            self.race_time += self.clock.delta_time;
            match self.car.state() {
                CarState::Running => self.handle_input(),
                CarState::Broken => {
                    log::info!("race over: car wrecked after {:.1}s", self.race_time);
                    self.outcome = Some(RaceOutcome::Wrecked);
                }
                CarState::Finished => {
                    log::info!("race finished in {:.1}s", self.race_time);
                    self.outcome = Some(RaceOutcome::Finished {
                        race_time: self.race_time,
                    });
                }
            }
        }

        self.update_camera();
        self.frame_output()
    }

    /// Screen resize notification; recomputes the camera immediately so no
    /// frame ever renders with a stale viewport
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        self.update_camera();
    }

    /// The snapshot consumed this frame, for external collaborators (the
    /// shoot signal has no in-core effect)
    pub fn last_input(&self) -> InputSnapshot {
        self.last_input
    }

    pub fn race_time(&self) -> f64 {
        self.race_time
    }

    pub fn outcome(&self) -> Option<RaceOutcome> {
        self.outcome
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    fn handle_input(&mut self) {
        let snapshot = self.input.poll();
        self.last_input = snapshot;
        self.car
            .set_direction(normalize_direction(snapshot.direction));
        self.car.set_accelerating(snapshot.accelerating);
        self.car.set_braking(snapshot.braking);
    }

    fn update_camera(&mut self) {
        let pose = self.car_pose();
        self.camera.update(
            pose,
            self.track.width_u(),
            self.track.height_u(),
            self.screen_width,
            self.screen_height,
        );
    }

    fn car_pose(&self) -> CarPose {
        CarPose {
            position: self.car.position(&self.world),
            angle: self.car.angle_deg(&self.world),
        }
    }

    fn frame_output(&self) -> FrameOutput {
        FrameOutput {
            viewport: Viewport {
                center: self.camera.position,
                width: self.camera.viewport_width,
                height: self.camera.viewport_height,
            },
            car: self.car_pose(),
            hud_time: format_race_time(self.race_time),
            debug: self.config.debug_overlay.then(|| DebugOverlay {
                tile_width: self.track.tile_width_u(),
                tile_height: self.track.tile_height_u(),
                map_width: self.track.width_u(),
                map_height: self.track.height_u(),
                car_marker: self.car.position(&self.world),
            }),
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_track::TileDef;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Input source that replays one snapshot and counts polls
    struct ScriptedSource {
        snapshot: InputSnapshot,
        polls: Rc<Cell<u32>>,
    }

    impl ScriptedSource {
        fn new(snapshot: InputSnapshot) -> (Box<dyn InputSource>, Rc<Cell<u32>>) {
            let polls = Rc::new(Cell::new(0));
            (
                Box::new(Self {
                    snapshot,
                    polls: polls.clone(),
                }),
                polls,
            )
        }
    }

    impl InputSource for ScriptedSource {
        fn poll(&mut self) -> InputSnapshot {
            self.polls.set(self.polls.get() + 1);
            self.snapshot
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

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
                id: 4,
                start: true,
                finish: true,
                ..Default::default()
            },
        ]
    }

    /// Open 4x4 track with a plain start tile
    fn driving_track() -> TrackMap {
        #[rustfmt::skip]
        let cells = vec![
            1, 1, 1, 1,
            1, 2, 1, 1,
            1, 1, 1, 1,
            1, 1, 1, 1,
        ];
        TrackMap::new(4, 4, 32, 32, cells, defs()).unwrap()
    }

    /// Track whose start tile is already in the finish region, so the race
    /// ends on the first frame
    fn instant_finish_track() -> TrackMap {
        TrackMap::new(2, 2, 32, 32, vec![4, 1, 1, 1], defs()).unwrap()
    }

    fn neutral() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_missing_start_tile_fails_fast() {
        let track = TrackMap::new(
            1,
            1,
            32,
            32,
            vec![1],
            vec![TileDef {
                id: 1,
                ..Default::default()
            }],
        )
        .unwrap();
        let (input, _) = ScriptedSource::new(neutral());
        assert!(RaceScreen::new(
            track,
            CarConfig::default(),
            ScreenConfig::default(),
            input,
            800.0,
            600.0
        )
        .is_err());
    }

    #[test]
    fn test_input_drives_the_car() {
        let (input, polls) = ScriptedSource::new(InputSnapshot {
            accelerating: true,
            ..Default::default()
        });
        let mut screen = RaceScreen::new(
            driving_track(),
            CarConfig::default(),
            ScreenConfig::default(),
            input,
            800.0,
            600.0,
        )
        .unwrap();

        let start_y = screen.car().position(&screen.world).y;
        for _ in 0..120 {
            screen.render(1.0 / 60.0);
        }
        let end_y = screen.car().position(&screen.world).y;

        assert!(end_y > start_y + 1.0);
        assert_eq!(polls.get(), 120);
        assert!(screen.last_input().accelerating);
    }

    #[test]
    fn test_finish_outcome_freezes_race_time() {
        let (input, polls) = ScriptedSource::new(neutral());
        let mut screen = RaceScreen::new(
            instant_finish_track(),
            CarConfig::default(),
            ScreenConfig::default(),
            input,
            800.0,
            600.0,
        )
        .unwrap();

        let output = screen.render(0.1);
        match output.outcome {
            Some(RaceOutcome::Finished { race_time }) => {
                assert!((race_time - 0.1).abs() < 1e-6);
            }
            other => panic!("expected finished outcome, got {:?}", other),
        }
        assert_eq!(output.hud_time, "0:00.1");

        // Terminal: input handling stops and the clock no longer advances
        let polls_at_finish = polls.get();
        let output = screen.render(0.1);
        assert_eq!(polls.get(), polls_at_finish);
        assert!((screen.race_time() - 0.1).abs() < 1e-6);
        assert!(matches!(
            output.outcome,
            Some(RaceOutcome::Finished { .. })
        ));
    }

    #[test]
    fn test_resize_recomputes_viewport_before_next_render() {
        let (input, _) = ScriptedSource::new(neutral());
        let mut screen = RaceScreen::new(
            driving_track(),
            CarConfig::default(),
            ScreenConfig::default(),
            input,
            800.0,
            600.0,
        )
        .unwrap();
        assert!((screen.camera().viewport_height - 30.0).abs() < 1e-6);

        screen.on_resize(400.0, 800.0);
        assert!((screen.camera().viewport_height - 80.0).abs() < 1e-6);

        // Map (8x8) is smaller than the viewport on both axes: centered
        assert!((screen.camera().position.x - 4.0).abs() < 1e-6);
        assert!((screen.camera().position.y - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_debug_overlay_is_gated() {
        let (input, _) = ScriptedSource::new(neutral());
        let mut screen = RaceScreen::new(
            driving_track(),
            CarConfig::default(),
            ScreenConfig::default(),
            input,
            800.0,
            600.0,
        )
        .unwrap();
        assert!(screen.render(1.0 / 60.0).debug.is_none());

        let (input, _) = ScriptedSource::new(neutral());
        let mut screen = RaceScreen::new(
            driving_track(),
            CarConfig::default(),
            ScreenConfig {
                debug_overlay: true,
                ..Default::default()
            },
            input,
            800.0,
            600.0,
        )
        .unwrap();
        let overlay = screen.render(1.0 / 60.0).debug.unwrap();
        assert!((overlay.map_width - 8.0).abs() < 1e-6);
        assert!((overlay.tile_width - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_hud_time_accrues_per_frame() {
        let (input, _) = ScriptedSource::new(neutral());
        let mut screen = RaceScreen::new(
            driving_track(),
            CarConfig::default(),
            ScreenConfig::default(),
            input,
            800.0,
            600.0,
        )
        .unwrap();

        let output = screen.render(0.05);
        assert_eq!(output.hud_time, "0:00.0");
        let output = screen.render(0.05);
        assert_eq!(output.hud_time, "0:00.1");
    }
}
