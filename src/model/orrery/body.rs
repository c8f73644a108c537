use std::path::PathBuf;

use nalgebra::Point3;

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    /// Radius of the rendered sphere (or bounding sphere, for models).
    pub radius: f32,
    pub orbit_radius: f64,
    /// Revolution rate, in radians per millisecond of frame time.
    pub angular_speed: f64,
    /// Angle at time zero.
    pub phase: f64,
    /// Self-rotation, in radians per frame.
    pub spin_rate: f64,
    pub texture: Option<PathBuf>,
    pub ring_color: Option<Point3<f32>>,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub info: BodyInfo,
    spin: f64,
    position: Point3<f64>,
}

impl BodyInfo {
    /// A body sitting still at the origin, like the Sun.
    pub fn fixed(name: &str, radius: f32) -> Self {
        BodyInfo {
            name: name.to_owned(),
            radius,
            orbit_radius: 0.0,
            angular_speed: 0.0,
            phase: 0.0,
            spin_rate: 0.0,
            texture: None,
            ring_color: None,
        }
    }

    pub fn orbiting(name: &str, radius: f32, orbit_radius: f64, angular_speed: f64) -> Self {
        BodyInfo {
            orbit_radius,
            angular_speed,
            ..BodyInfo::fixed(name, radius)
        }
    }

    pub fn with_spin_rate(mut self, spin_rate: f64) -> Self {
        self.spin_rate = spin_rate;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

impl Body {
    pub fn new(info: BodyInfo) -> Self {
        let mut body = Body {
            info,
            spin: 0.0,
            position: Point3::origin(),
        };
        body.position = body.position_at(0.0, 1.0);
        body
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Where the body is at the given time. This is evaluated from scratch each call, so
    /// changing the multiplier jumps the phase rather than changing the velocity.
    pub fn position_at(&self, time: f64, speed_multiplier: f64) -> Point3<f64> {
        let angle = time * speed_multiplier * self.info.angular_speed + self.info.phase;
        let r = self.info.orbit_radius;
        Point3::new(r * angle.cos(), 0.0, r * angle.sin())
    }

    pub fn update_position(&mut self, time: f64, speed_multiplier: f64) -> Point3<f64> {
        self.position = self.position_at(time, speed_multiplier);
        self.position
    }

    /// Position as of the last update.
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Advances the self-rotation by one frame's worth.
    pub fn spin(&mut self) -> f64 {
        self.spin += self.info.spin_rate;
        self.spin
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin
    }

    /// Length of the diagonal of the body's bounding box.
    pub fn bounding_size(&self) -> f64 {
        2.0 * 3f64.sqrt() * self.info.radius as f64
    }
}
