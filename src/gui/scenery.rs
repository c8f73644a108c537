//! Building the static parts of a scene in kiss3d, and pushing model state into scene nodes.

use std::cell::RefCell;
use std::f32::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use kiss3d::light::Light;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use log::{debug, warn};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use thiserror::Error;

use crate::math::geometry::annulus;
use crate::model::{BodyInfo, LightRig, LightSource, SatelliteInfo, Visual, SATELLITE_SCALE};

pub const SKYBOX_SIZE: f32 = 1000.0;
const RING_WIDTH: f32 = 0.1;
const RING_SEGMENTS: usize = 100;
// Directional lights become point lights this far away
const FAR_LIGHT_DISTANCE: f32 = 1.0e4;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset file {0} does not exist")]
    Missing(PathBuf),
}

impl Visual for SceneNode {
    fn set_position(&mut self, position: Point3<f64>) {
        let position: Point3<f32> = nalgebra::convert(position);
        self.set_local_translation(Translation3::from(position.coords));
    }

    fn set_spin(&mut self, angle: f64) {
        self.set_local_rotation(UnitQuaternion::from_axis_angle(
            &Vector3::y_axis(),
            angle as f32,
        ));
    }

    fn set_visible(&mut self, visible: bool) {
        SceneNode::set_visible(self, visible)
    }
}

fn require(path: PathBuf) -> Result<PathBuf, AssetError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::Missing(path))
    }
}

/// Six inward-facing textured quads around the origin. Faces without an image stay dark.
pub fn add_skybox(window: &mut Window, dir: &Path) -> SceneNode {
    let half = SKYBOX_SIZE / 2.0;
    // (image, center, rotation taking the quad's +z normal to point inward)
    let faces = [
        ("space_ft.png", Vector3::new(half, 0.0, 0.0), Vector3::y() * -FRAC_PI_2),
        ("space_bk.png", Vector3::new(-half, 0.0, 0.0), Vector3::y() * FRAC_PI_2),
        ("space_up.png", Vector3::new(0.0, half, 0.0), Vector3::x() * FRAC_PI_2),
        ("space_dn.png", Vector3::new(0.0, -half, 0.0), Vector3::x() * -FRAC_PI_2),
        ("space_rt.png", Vector3::new(0.0, 0.0, half), Vector3::y() * PI),
        ("space_lf.png", Vector3::new(0.0, 0.0, -half), Vector3::zeros()),
    ];

    let mut skybox = window.add_group();
    for (image, center, axisangle) in faces.iter() {
        let mut face = skybox.add_quad(SKYBOX_SIZE, SKYBOX_SIZE, 1, 1);
        face.set_local_transformation(Isometry3::new(*center, *axisangle));
        face.enable_backface_culling(false);

        match require(dir.join(image)) {
            Ok(path) => face.set_texture_from_file(&path, &format!("skybox/{}", image)),
            Err(e) => {
                warn!("{}; leaving that side of the sky blank", e);
                face.set_color(0.0, 0.0, 0.0);
            }
        }
    }
    skybox
}

/// A sphere for the body, textured if the texture can be found.
pub fn add_body(window: &mut Window, info: &BodyInfo, assets: &Path) -> SceneNode {
    let mut sphere = window.add_sphere(info.radius);

    let texture = match &info.texture {
        Some(file) => require(assets.join(file)).map(Some),
        None => Ok(None),
    };
    match texture {
        Ok(Some(path)) => {
            debug!("Texturing {} with {}", info.name, path.display());
            sphere.set_texture_from_file(&path, &info.name);
        }
        Ok(None) => set_fallback_color(&mut sphere, info),
        Err(e) => {
            warn!("{}; drawing {} in a flat color", e, info.name);
            set_fallback_color(&mut sphere, info);
        }
    }
    sphere
}

fn set_fallback_color(node: &mut SceneNode, info: &BodyInfo) {
    let color = info.ring_color.unwrap_or_else(|| Point3::new(0.8, 0.8, 0.8));
    node.set_color(color.x, color.y, color.z);
}

/// A thin flat ring lying just inside the given orbit.
pub fn add_ring(window: &mut Window, orbit_radius: f64, color: Point3<f32>) -> SceneNode {
    let outer = orbit_radius as f32;
    let (coords, faces) = annulus(outer - RING_WIDTH, outer, RING_SEGMENTS);
    let mesh = Mesh::new(coords, faces, None, None, false);

    let mut ring = window.add_mesh(Rc::new(RefCell::new(mesh)), Vector3::repeat(1.0));
    ring.set_color(color.x, color.y, color.z);
    ring.enable_backface_culling(false);
    ring
}

pub fn add_satellite(
    window: &mut Window,
    info: &SatelliteInfo,
    assets: &Path,
) -> Result<SceneNode, AssetError> {
    let path = require(assets.join(&info.model))?;
    let mtl_dir = path.parent().unwrap_or(assets).to_owned();
    debug!("Loading {} from {}", info.name, path.display());
    Ok(window.add_obj(&path, &mtl_dir, Vector3::repeat(SATELLITE_SCALE)))
}

/// kiss3d only has one light, so we install whichever source does the real shading.
pub fn apply_light_rig(window: &mut Window, rig: &LightRig) {
    let light = match rig.dominant() {
        Some(LightSource::Point { position, .. }) => Light::Absolute(*position),
        Some(LightSource::Directional { direction, .. }) => {
            Light::Absolute(Point3::from(direction.into_inner() * FAR_LIGHT_DISTANCE))
        }
        _ => Light::StickToCamera,
    };
    window.set_light(light);
}
