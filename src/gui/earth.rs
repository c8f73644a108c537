use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};

use kiss3d::camera::Camera;
use kiss3d::window::Window;
use log::{info, warn};
use nalgebra::{Point2, Point3, Vector3};

use super::camera::OrbitCamera;
use super::hud;
use super::scenery::{add_body, add_satellite, add_skybox};
use super::stage::Stage;
use super::SceneView;
use crate::model::{Command, FollowStyle, LightingMode, Orrery, SatelliteInfo, SimulationState};
use crate::orbital_data::{ElementsPanel, FetchError, PlanetRecord};

pub type FetchReceiver = Receiver<Result<PlanetRecord, FetchError>>;

/// The Earth and Moon with a ring of satellites, and the orbital elements panel.
pub struct EarthView {
    stage: Stage,
    panel: ElementsPanel,
    fetch: Option<FetchReceiver>,
}

impl EarthView {
    pub fn new(
        mut orrery: Orrery,
        satellites: Vec<SatelliteInfo>,
        assets: &Path,
        fetch: Option<FetchReceiver>,
        window: &mut Window,
    ) -> Self {
        let camera = OrbitCamera::new(Point3::new(-20.0, 100.0, 90.0), Point3::new(5.0, 5.0, 5.0));
        let state = SimulationState::new(FollowStyle::chase())
            .with_lighting(LightingMode::Studio)
            .without_scene_toggles();

        add_skybox(window, assets);
        let mut nodes = Vec::new();
        for body in orrery.bodies() {
            nodes.push((body.name().to_owned(), add_body(window, &body.info, assets)));
        }

        // A satellite whose model can't be loaded is left out entirely
        let mut satellite_count = 0;
        for satellite in satellites {
            match add_satellite(window, &satellite, assets) {
                Ok(mut node) => match orrery.add_body(satellite.to_body_info()) {
                    Ok(_) => {
                        nodes.push((satellite.name.clone(), node));
                        satellite_count += 1;
                    }
                    Err(e) => {
                        warn!("Skipping satellite: {}", e);
                        window.remove_node(&mut node);
                    }
                },
                Err(e) => warn!("Skipping satellite {}: {}", satellite.name, e),
            }
        }
        info!(
            "Earth scene ready: {} bodies, {} satellites",
            orrery.len(),
            satellite_count
        );

        let mut stage =
            Stage::new(orrery, state, camera).with_studio_light(Vector3::new(0.0, 50.0, 50.0));
        stage.nodes.extend(nodes);
        stage.sync(window);

        EarthView {
            stage,
            panel: ElementsPanel::new(),
            fetch,
        }
    }

    fn poll_fetch(&mut self) {
        let result = match &self.fetch {
            Some(rx) => match rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => Err(FetchError::Disconnected),
            },
            None => return,
        };
        self.panel.apply(result);
        self.fetch = None;
    }

    /// The nearest orbiting body under the cursor.
    fn pick(&self, cursor: &Point2<f32>) -> Option<String> {
        let (origin, direction) = self.stage.camera.ray_through(cursor)?;
        let nodes = &self.stage.nodes;
        self.stage
            .orrery
            .pick(&origin, &direction, |name| nodes.contains_key(name))
            .map(str::to_owned)
    }
}

impl SceneView for EarthView {
    fn orrery(&self) -> &Orrery {
        &self.stage.orrery
    }

    fn state(&self) -> &SimulationState {
        &self.stage.state
    }

    fn handle_command(&mut self, command: Command, window: &mut Window) {
        self.stage.handle_command(command, window);
    }

    fn handle_click(&mut self, cursor: &Point2<f32>) -> Option<Command> {
        let name = self.pick(cursor)?;
        info!("Picked {}", name);
        Some(Command::Select(name))
    }

    fn update(&mut self, time: f64) {
        self.poll_fetch();
        self.stage.update(time);
    }

    fn prerender(&mut self, window: &mut Window, time: f64, fps: f64) {
        hud::draw(
            window,
            &hud::controls_text(&self.stage.state),
            &hud::time_summary_text(time, fps),
        );
        hud::draw_panel(window, &self.panel);
    }

    fn camera_mut(&mut self) -> &mut dyn Camera {
        &mut self.stage.camera
    }
}
