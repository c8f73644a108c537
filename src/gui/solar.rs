use std::path::Path;

use kiss3d::camera::Camera;
use kiss3d::window::Window;
use log::info;
use nalgebra::Point3;

use super::camera::OrbitCamera;
use super::hud;
use super::scenery::{add_body, add_ring, add_skybox};
use super::stage::Stage;
use super::SceneView;
use crate::model::{Command, FollowStyle, Orrery, SimulationState};

/// The Sun and its planets, each with a colored ring marking its orbit.
pub struct SolarView {
    stage: Stage,
}

impl SolarView {
    pub fn new(orrery: Orrery, speed_multiplier: f64, assets: &Path, window: &mut Window) -> Self {
        let camera = OrbitCamera::new(Point3::new(0.0, 0.0, 100.0), Point3::origin())
            .with_distance_limits(12.0, 1000.0);
        let state = SimulationState::new(FollowStyle::fixed()).with_speed(speed_multiplier);
        let mut stage = Stage::new(orrery, state, camera);

        add_skybox(window, assets);
        for body in stage.orrery.bodies() {
            let node = add_body(window, &body.info, assets);
            stage.nodes.insert(body.name().to_owned(), node);

            if let Some(color) = body.info.ring_color {
                let ring = add_ring(window, body.info.orbit_radius, color);
                stage.rings.add(ring);
            }
        }
        info!(
            "Solar scene ready: {} bodies, {} rings",
            stage.nodes.len(),
            stage.rings.len()
        );

        stage.sync(window);
        SolarView { stage }
    }
}

impl SceneView for SolarView {
    fn orrery(&self) -> &Orrery {
        &self.stage.orrery
    }

    fn state(&self) -> &SimulationState {
        &self.stage.state
    }

    fn handle_command(&mut self, command: Command, window: &mut Window) {
        self.stage.handle_command(command, window);
    }

    fn update(&mut self, time: f64) {
        self.stage.update(time);
    }

    fn prerender(&mut self, window: &mut Window, time: f64, fps: f64) {
        hud::draw(
            window,
            &hud::controls_text(&self.stage.state),
            &hud::time_summary_text(time, fps),
        );
    }

    fn camera_mut(&mut self) -> &mut dyn Camera {
        &mut self.stage.camera
    }
}
