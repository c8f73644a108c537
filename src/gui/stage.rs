use std::collections::HashMap;

use kiss3d::camera::Camera;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use log::debug;
use nalgebra::{Point3, Vector3};

use super::camera::OrbitCamera;
use super::scenery::apply_light_rig;
use crate::model::state::FIRST_PERSON_EYE;
use crate::model::{
    CameraCommand, Command, LightRig, Orrery, Reaction, RingSet, SimulationState, ViewMode,
    DEFAULT_STUDIO_FROM,
};

/// The parts every scene has: the bodies and their nodes, the rings, the lights and the camera.
pub struct Stage {
    pub orrery: Orrery,
    pub state: SimulationState,
    pub nodes: HashMap<String, SceneNode>,
    pub rings: RingSet<SceneNode>,
    pub camera: OrbitCamera,
    studio_from: Vector3<f32>,
}

impl Stage {
    pub fn new(orrery: Orrery, state: SimulationState, camera: OrbitCamera) -> Self {
        Stage {
            orrery,
            state,
            nodes: HashMap::new(),
            rings: RingSet::new(),
            camera,
            studio_from: Vector3::from(DEFAULT_STUDIO_FROM),
        }
    }

    /// Where the directional light of the studio rig shines from.
    pub fn with_studio_light(mut self, from: Vector3<f32>) -> Self {
        self.studio_from = from;
        self
    }

    pub fn light_rig(&self) -> LightRig {
        LightRig::for_mode(self.state.lighting(), self.studio_from)
    }

    /// Brings the engine in line with the current state. Called once after the scene is built.
    pub fn sync(&mut self, window: &mut Window) {
        self.state.place(&mut self.orrery, 0.0, &mut self.nodes);
        self.rings.show(self.state.orbits_visible());
        apply_light_rig(window, &self.light_rig());
        apply_view_mode(&mut self.camera, self.state.view_mode());
    }

    pub fn handle_command(&mut self, command: Command, window: &mut Window) -> Reaction {
        let reaction = self.state.apply(command, &self.orrery);
        match &reaction {
            Reaction::OrbitsChanged(visible) => self.rings.show(*visible),
            Reaction::LightingChanged(_) => apply_light_rig(window, &self.light_rig()),
            Reaction::ViewModeChanged(mode) => apply_view_mode(&mut self.camera, *mode),
            _ => {}
        }
        reaction
    }

    pub fn update(&mut self, time: f64) {
        let eye: Point3<f64> = nalgebra::convert(self.camera.eye());
        let command = self
            .state
            .advance(&mut self.orrery, time, &mut self.nodes, &eye);
        if let CameraCommand::LookFrom { eye, target } = command {
            self.camera
                .look_from(nalgebra::convert(eye), nalgebra::convert(target));
        }
    }
}

pub fn apply_view_mode(camera: &mut OrbitCamera, mode: ViewMode) {
    debug!("Switching to {:?}", mode);
    match mode {
        ViewMode::FirstPerson => {
            camera.set_controls_enabled(false);
            let eye: Point3<f64> = FIRST_PERSON_EYE.into();
            camera.look_from(nalgebra::convert(eye), Point3::origin());
        }
        ViewMode::Orbit => camera.set_controls_enabled(true),
    }
}
