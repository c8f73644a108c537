use std::collections::HashMap;

use nalgebra::{Point3, Unit, Vector3};
use thiserror::Error;

use crate::math::geometry::ray_sphere_intersection;

mod body;

pub use body::{Body, BodyInfo};

#[derive(Debug, Error, PartialEq)]
pub enum OrreryError {
    #[error("a body named {0:?} already exists")]
    DuplicateBody(String),
}

/// Every body in a scene, keyed by name. The catalog order is remembered separately, since the
/// selection list presents bodies in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Orrery {
    bodies: HashMap<String, Body>,
    order: Vec<String>,
}

impl Orrery {
    pub fn new() -> Self {
        Orrery {
            bodies: HashMap::new(),
            order: vec![],
        }
    }

    pub fn add_body(&mut self, info: BodyInfo) -> Result<&Body, OrreryError> {
        if self.bodies.contains_key(&info.name) {
            return Err(OrreryError::DuplicateBody(info.name));
        }

        let name = info.name.clone();
        self.order.push(name.clone());
        Ok(self.bodies.entry(name).or_insert_with(|| Body::new(info)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    pub fn get_body(&self, name: &str) -> Option<&Body> {
        self.bodies.get(name)
    }

    /// Bodies in catalog order.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order.iter().map(move |name| &self.bodies[name])
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.bodies.values_mut()
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Name of the body `step` places away from `current` in catalog order, wrapping around.
    /// With no current body, stepping forward starts at the first body and stepping back at
    /// the last.
    pub fn cycle(&self, current: Option<&str>, step: isize) -> Option<&str> {
        let n = self.order.len() as isize;
        if n == 0 {
            return None;
        }

        let idx = match current.and_then(|name| self.order.iter().position(|x| x == name)) {
            Some(idx) => (idx as isize + step).rem_euclid(n),
            None if step >= 0 => 0,
            None => n - 1,
        };
        Some(&self.order[idx as usize])
    }

    /// The orbiting body the ray hits first, out of those `has_visual` accepts. Bodies at the
    /// center of the scene can't be picked, so a ray through the Earth alone picks nothing.
    pub fn pick<F>(
        &self,
        origin: &Point3<f32>,
        direction: &Unit<Vector3<f32>>,
        has_visual: F,
    ) -> Option<&str>
    where
        F: Fn(&str) -> bool,
    {
        self.bodies()
            .filter(|b| b.info.orbit_radius > 0.0 && has_visual(b.name()))
            .filter_map(|b| {
                let center: Point3<f32> = nalgebra::convert(b.position());
                ray_sphere_intersection(origin, direction, &center, b.info.radius)
                    .map(|t| (t, b.name()))
            })
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn three_planets() -> Orrery {
        let mut orrery = Orrery::new();
        orrery.add_body(BodyInfo::fixed("sun", 20.0)).unwrap();
        orrery
            .add_body(BodyInfo::orbiting("mercury", 4.0, 50.0, 0.01))
            .unwrap();
        orrery
            .add_body(BodyInfo::orbiting("venus", 4.0, 60.0, 0.008))
            .unwrap();
        orrery
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut orrery = three_planets();
        let result = orrery.add_body(BodyInfo::fixed("venus", 1.0));
        assert_eq!(
            result.err(),
            Some(OrreryError::DuplicateBody("venus".to_owned()))
        );
        assert_eq!(orrery.len(), 3);
    }

    #[test]
    fn test_catalog_order() {
        let orrery = three_planets();
        let names: Vec<_> = orrery.bodies().map(|b| b.name()).collect();
        assert_eq!(names, vec!["sun", "mercury", "venus"]);
    }

    #[test]
    fn test_cycle() {
        let orrery = three_planets();
        assert_eq!(orrery.cycle(None, 1), Some("sun"));
        assert_eq!(orrery.cycle(None, -1), Some("venus"));
        assert_eq!(orrery.cycle(Some("venus"), 1), Some("sun"));
        assert_eq!(orrery.cycle(Some("sun"), -1), Some("venus"));
        assert_eq!(orrery.cycle(Some("pluto"), 1), Some("sun"));
        assert_eq!(Orrery::new().cycle(None, 1), None);
    }

    #[test]
    fn test_positions_on_circle() {
        let orrery = three_planets();
        for body in orrery.bodies() {
            for &multiplier in &[1.0, 0.5, 3.0, -2.0] {
                for i in 0..50 {
                    let time = i as f64 * 137.0;
                    let pos = body.position_at(time, multiplier);
                    let r = body.info.orbit_radius;
                    assert_relative_eq!(pos.x * pos.x + pos.z * pos.z, r * r, epsilon = 1e-9);
                    assert_eq!(pos.y, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_position_is_pure() {
        let orrery = three_planets();
        let mercury = orrery.get_body("mercury").unwrap();
        let a = mercury.position_at(1234.5, 2.0);
        let b = mercury.position_at(1234.5, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_phase_offset() {
        let body = Body::new(
            BodyInfo::orbiting("hubble", 1.0, 60.0, 0.0).with_phase(std::f64::consts::FRAC_PI_2),
        );
        assert_relative_eq!(
            body.position_at(500.0, 1.0),
            Point3::new(0.0, 0.0, 60.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_spin_ignores_time() {
        let mut body = Body::new(BodyInfo::fixed("sun", 20.0).with_spin_rate(0.005));
        let mut previous = body.spin_angle();
        for _ in 0..10 {
            let next = body.spin();
            assert_relative_eq!(next - previous, 0.005, epsilon = 1e-12);
            previous = next;
        }
    }

    // Earth in the middle, the Moon at (70, 0, 0), and a satellite sitting inside the Moon's
    // sphere on the near side
    fn earth_system() -> Orrery {
        let mut orrery = Orrery::new();
        orrery.add_body(BodyInfo::fixed("earth", 45.0)).unwrap();
        orrery
            .add_body(BodyInfo::orbiting("moon", 8.0, 70.0, 1.2e-4))
            .unwrap();
        orrery
            .add_body(BodyInfo::orbiting("iss", 3.0, 66.0, 1.2e-4))
            .unwrap();
        orrery
    }

    #[test]
    fn test_pick_nearest_hit() {
        let orrery = earth_system();
        let origin = Point3::new(200.0, 0.0, 0.0);
        let toward_earth = -Vector3::x_axis();

        // Enters the Moon at x = 78 before the satellite at x = 69
        assert_eq!(orrery.pick(&origin, &toward_earth, |_| true), Some("moon"));
        assert_eq!(
            orrery.pick(&origin, &toward_earth, |name| name != "moon"),
            Some("iss")
        );
        assert_eq!(orrery.pick(&origin, &toward_earth, |name| name == "earth"), None);
    }

    #[test]
    fn test_pick_skips_center_body() {
        let orrery = earth_system();
        let above = Point3::new(0.0, 0.0, 200.0);
        assert_eq!(orrery.pick(&above, &-Vector3::z_axis(), |_| true), None);

        // Pointing away from everything
        let origin = Point3::new(200.0, 0.0, 0.0);
        assert_eq!(orrery.pick(&origin, &Vector3::x_axis(), |_| true), None);
    }
}
