use std::path::PathBuf;

use super::orrery::BodyInfo;

/// All satellite models are drawn at this fraction of their authored size.
pub const SATELLITE_SCALE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteInfo {
    pub name: String,
    pub model: PathBuf,
    /// Fixed angle between this satellite and the reference point of the shared orbit.
    pub angle_offset: f64,
    pub orbit_radius: f64,
    pub angular_speed: f64,
    /// Bounding radius of the model, in model units (before scaling).
    pub extent: f32,
}

impl SatelliteInfo {
    pub fn bounding_radius(&self) -> f32 {
        self.extent * SATELLITE_SCALE
    }

    pub fn to_body_info(&self) -> BodyInfo {
        BodyInfo::orbiting(
            &self.name,
            self.bounding_radius(),
            self.orbit_radius,
            self.angular_speed,
        )
        .with_phase(self.angle_offset)
    }
}
