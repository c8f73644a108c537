use nalgebra::{Point3, Unit, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    /// A single point light at the origin, where the Sun is.
    Sun,
    /// Ambient fill plus one directional light.
    Studio,
}

impl LightingMode {
    pub fn toggled(self) -> Self {
        match self {
            LightingMode::Sun => LightingMode::Studio,
            LightingMode::Studio => LightingMode::Sun,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightSource {
    Point {
        position: Point3<f32>,
        intensity: f32,
    },
    Ambient {
        color: Point3<f32>,
        intensity: f32,
    },
    Directional {
        direction: Unit<Vector3<f32>>,
        intensity: f32,
    },
}

/// The full set of lights in a scene. Switching modes replaces the whole rig.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    sources: Vec<LightSource>,
}

/// Where the studio light shines from unless a scene says otherwise.
pub const DEFAULT_STUDIO_FROM: [f32; 3] = [10.0, 10.0, 10.0];

// 0x404040
const AMBIENT_GREY: f32 = 64.0 / 255.0;

impl LightRig {
    pub fn sun() -> Self {
        LightRig {
            sources: vec![LightSource::Point {
                position: Point3::origin(),
                intensity: 1.0,
            }],
        }
    }

    /// Soft ambient light plus a white directional light shining from `from`.
    pub fn studio(from: Vector3<f32>) -> Self {
        LightRig {
            sources: vec![
                LightSource::Ambient {
                    color: Point3::new(AMBIENT_GREY, AMBIENT_GREY, AMBIENT_GREY),
                    intensity: 1.0,
                },
                LightSource::Directional {
                    direction: Unit::new_normalize(from),
                    intensity: 1.0,
                },
            ],
        }
    }

    /// The rig for `mode`; `studio_from` only matters in studio mode.
    pub fn for_mode(mode: LightingMode, studio_from: Vector3<f32>) -> Self {
        match mode {
            LightingMode::Sun => LightRig::sun(),
            LightingMode::Studio => LightRig::studio(studio_from),
        }
    }

    pub fn sources(&self) -> &[LightSource] {
        &self.sources
    }

    /// The light that does the actual shading: the first point or directional source.
    /// Ambient light only fills in.
    pub fn dominant(&self) -> Option<&LightSource> {
        self.sources
            .iter()
            .find(|s| !matches!(s, LightSource::Ambient { .. }))
    }
}
