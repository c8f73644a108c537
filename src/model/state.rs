use std::collections::HashMap;

use log::{debug, info, warn};
use nalgebra::Point3;

use super::focus::{FocusState, FollowStyle};
use super::lighting::LightingMode;
use super::orrery::Orrery;
use super::visual::Visual;

/// Where the first-person observer stands. They always look at the origin.
pub const FIRST_PERSON_EYE: [f64; 3] = [0.0, 10.0, 10.0];

// Scaling the speed never takes its magnitude below this, so it can always be scaled back up
const MIN_SCALED_SPEED: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The user drags the camera around.
    Orbit,
    /// Controls are off and the camera is pinned at the observation point.
    FirstPerson,
}

impl Command {
    fn is_scene_toggle(&self) -> bool {
        matches!(
            self,
            Command::SetViewMode(_)
                | Command::ToggleViewMode
                | Command::ToggleOrbits
                | Command::ToggleLighting
        )
    }
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Orbit => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::Orbit,
        }
    }
}

/// Everything a user can ask the scene to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(String),
    Release,
    SetSpeed(f64),
    ScaleSpeed(f64),
    ReverseSpeed,
    SetViewMode(ViewMode),
    ToggleViewMode,
    ToggleOrbits,
    ToggleLighting,
}

/// What changed as a result of a command, so the view knows what to re-derive.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    Nothing,
    FocusChanged(Option<String>),
    SpeedChanged(f64),
    ViewModeChanged(ViewMode),
    OrbitsChanged(bool),
    LightingChanged(LightingMode),
}

/// What the camera should do this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCommand {
    /// Leave it alone; the user (or nobody) is in charge.
    Hold,
    LookFrom {
        eye: Point3<f64>,
        target: Point3<f64>,
    },
}

/// The knobs the user can turn, gathered in one place. The per-frame update reads these and
/// nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    speed_multiplier: f64,
    orbits_visible: bool,
    lighting: LightingMode,
    view_mode: ViewMode,
    focus: FocusState,
    scene_toggles: bool,
}

impl SimulationState {
    pub fn new(follow_style: FollowStyle) -> Self {
        SimulationState {
            speed_multiplier: 1.0,
            orbits_visible: true,
            lighting: LightingMode::Sun,
            view_mode: ViewMode::Orbit,
            focus: FocusState::new(follow_style),
            scene_toggles: true,
        }
    }

    /// For scenes with nothing to toggle: view mode, orbit and lighting commands do nothing.
    pub fn without_scene_toggles(mut self) -> Self {
        self.scene_toggles = false;
        self
    }

    pub fn has_scene_toggles(&self) -> bool {
        self.scene_toggles
    }

    pub fn with_lighting(mut self, lighting: LightingMode) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_speed(mut self, speed_multiplier: f64) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn orbits_visible(&self) -> bool {
        self.orbits_visible
    }

    pub fn lighting(&self) -> LightingMode {
        self.lighting
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn apply(&mut self, command: Command, orrery: &Orrery) -> Reaction {
        debug!("Applying {:?}", command);
        if !self.scene_toggles && command.is_scene_toggle() {
            debug!("No toggles in this scene, ignoring {:?}", command);
            return Reaction::Nothing;
        }

        match command {
            Command::Select(name) => {
                if !orrery.contains(&name) {
                    warn!("Ignoring selection of unknown body {:?}", name);
                    return Reaction::Nothing;
                }
                info!("Following {}", name);
                self.focus.follow(&name);
                Reaction::FocusChanged(Some(name))
            }
            Command::Release => {
                if self.focus.is_free() {
                    return Reaction::Nothing;
                }
                info!("Camera released");
                self.focus.release();
                Reaction::FocusChanged(None)
            }
            Command::SetSpeed(speed) => self.set_speed(speed),
            Command::ScaleSpeed(factor) => {
                let scaled = self.speed_multiplier * factor;
                if scaled.abs() < MIN_SCALED_SPEED {
                    self.set_speed(MIN_SCALED_SPEED.copysign(scaled))
                } else {
                    self.set_speed(scaled)
                }
            }
            Command::ReverseSpeed => self.set_speed(-self.speed_multiplier),
            Command::SetViewMode(mode) => {
                if mode == self.view_mode {
                    return Reaction::Nothing;
                }
                self.view_mode = mode;
                Reaction::ViewModeChanged(mode)
            }
            Command::ToggleViewMode => {
                self.view_mode = self.view_mode.toggled();
                Reaction::ViewModeChanged(self.view_mode)
            }
            Command::ToggleOrbits => {
                self.orbits_visible = !self.orbits_visible;
                Reaction::OrbitsChanged(self.orbits_visible)
            }
            Command::ToggleLighting => {
                self.lighting = self.lighting.toggled();
                info!("Lighting is now {:?}", self.lighting);
                Reaction::LightingChanged(self.lighting)
            }
        }
    }

    fn set_speed(&mut self, speed: f64) -> Reaction {
        self.speed_multiplier = speed;
        info!("Speed multiplier is {}", speed);
        Reaction::SpeedChanged(speed)
    }

    /// Puts every visual where its body is at `time` without advancing anything. Used when a
    /// scene is built, before the first frame.
    pub fn place<V: Visual>(
        &self,
        orrery: &mut Orrery,
        time: f64,
        visuals: &mut HashMap<String, V>,
    ) {
        for body in orrery.bodies_mut() {
            let position = body.update_position(time, self.speed_multiplier);
            if let Some(visual) = visuals.get_mut(body.name()) {
                visual.set_position(position);
                visual.set_spin(body.spin_angle());
            }
        }
    }

    /// Moves every body to where it belongs at `time` and works out the camera.
    ///
    /// Bodies without a visual are still advanced, they just have nothing to draw. Likewise a
    /// followed body without a visual leaves the camera alone until one shows up.
    pub fn advance<V: Visual>(
        &self,
        orrery: &mut Orrery,
        time: f64,
        visuals: &mut HashMap<String, V>,
        camera_eye: &Point3<f64>,
    ) -> CameraCommand {
        for body in orrery.bodies_mut() {
            let position = body.update_position(time, self.speed_multiplier);
            let spin = body.spin();
            if let Some(visual) = visuals.get_mut(body.name()) {
                visual.set_position(position);
                visual.set_spin(spin);
            }
        }

        // First-person wins over following; the target is kept for when we switch back
        if self.view_mode == ViewMode::FirstPerson {
            return CameraCommand::Hold;
        }

        let name = match self.focus.target() {
            Some(name) => name,
            None => return CameraCommand::Hold,
        };
        let body = match orrery.get_body(name) {
            Some(body) if visuals.contains_key(name) => body,
            _ => return CameraCommand::Hold,
        };

        let target = body.position();
        CameraCommand::LookFrom {
            eye: self
                .focus
                .style()
                .eye(camera_eye, &target, body.bounding_size()),
            target,
        }
    }
}
