use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use log::info;
use nalgebra::Point2;

use self::controller::{Controller, UserInput};
use crate::model::{Command, Orrery, RunLoop, SimulationState};

pub use self::earth::EarthView;
pub use self::solar::SolarView;

mod camera;
mod controller;
mod earth;
mod hud;
mod scenery;
mod solar;
mod stage;

/// One of the scenes: owns its bodies, their nodes, and its camera.
pub trait SceneView {
    fn orrery(&self) -> &Orrery;
    fn state(&self) -> &SimulationState;
    fn handle_command(&mut self, command: Command, window: &mut Window);
    /// What a click at this cursor position means, if anything.
    fn handle_click(&mut self, _cursor: &Point2<f32>) -> Option<Command> {
        None
    }
    fn update(&mut self, time: f64);
    fn prerender(&mut self, window: &mut Window, time: f64, fps: f64);
    fn camera_mut(&mut self) -> &mut dyn Camera;
}

pub struct Simulation<V> {
    view: V,
    controller: Controller,
    run_loop: RunLoop,
}

impl<V: SceneView> Simulation<V> {
    pub fn new(view: V, run_loop: RunLoop) -> Self {
        Self {
            view,
            controller: Controller::new(),
            run_loop,
        }
    }

    fn process_user_input(&mut self, mut events: EventManager, window: &mut Window) {
        for event in events.iter() {
            if let Some(input) = self.controller.process_event(event) {
                if let Some(command) = self.resolve(input) {
                    self.view.handle_command(command, window);
                }
            }
        }
    }

    /// Turns raw input into a command, looking up bodies by position where needed.
    fn resolve(&mut self, input: UserInput) -> Option<Command> {
        let orrery = self.view.orrery();
        match input {
            UserInput::Command(command) => Some(command),
            UserInput::CycleFocus(step) => {
                let current = self.view.state().focus().target();
                let name = orrery.cycle(current, step)?;
                Some(Command::Select(name.to_owned()))
            }
            UserInput::FocusSlot(slot) => {
                let name = orrery.names().get(slot)?;
                Some(Command::Select(name.clone()))
            }
            UserInput::Click(cursor) => self.view.handle_click(&cursor),
        }
    }
}

impl<V: SceneView + 'static> State for Simulation<V> {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(self.view.camera_mut()), None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        let time = match self.run_loop.next_frame() {
            Some(time) => time,
            None => {
                info!("Run loop stopped after {} frames", self.run_loop.frames());
                window.close();
                return;
            }
        };

        self.process_user_input(window.events(), window);
        self.view.update(time);
        self.view.prerender(window, time, self.controller.fps());
        self.controller.increment_frame_counter();
    }
}
