use nalgebra::{Point3, Unit, Vector3};

/// Evaluates `f` at `num_segments + 1` evenly spaced parameters between `t_start` and `t_end`
/// (both inclusive).
pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Builds a flat ring in the xz-plane, centered on the origin.
///
/// Vertices alternate inner, outer, inner, outer... around the ring, and the seam vertices are
/// duplicated so the strip closes without wrapping indices. Faces are returned as index
/// triples into the vertex list.
pub fn annulus(
    inner_radius: f32,
    outer_radius: f32,
    num_segments: usize,
) -> (Vec<Point3<f32>>, Vec<Point3<u16>>) {
    assert!(
        2 * (num_segments + 1) <= u16::MAX as usize,
        "Too many segments for a u16 index buffer: {}",
        num_segments
    );

    let circle = |radius: f32| {
        move |theta: f32| Point3::new(radius * theta.cos(), 0.0, radius * theta.sin())
    };
    let tau = std::f32::consts::TAU;
    let inner = path_iter_parametric(circle(inner_radius), 0.0, tau, num_segments);
    let outer = path_iter_parametric(circle(outer_radius), 0.0, tau, num_segments);

    let mut coords = Vec::with_capacity(2 * (num_segments + 1));
    for (a, b) in inner.zip(outer) {
        coords.push(a);
        coords.push(b);
    }

    let mut faces = Vec::with_capacity(2 * num_segments);
    for i in 0..num_segments {
        let k = (2 * i) as u16;
        faces.push(Point3::new(k, k + 1, k + 2));
        faces.push(Point3::new(k + 1, k + 3, k + 2));
    }

    (coords, faces)
}

/// Returns the distance along the ray to the nearest point where it enters the sphere, or `None`
/// if the ray misses. A ray starting inside the sphere reports the exit point.
pub fn ray_sphere_intersection(
    origin: &Point3<f32>,
    direction: &Unit<Vector3<f32>>,
    center: &Point3<f32>,
    radius: f32,
) -> Option<f32> {
    // Solve |o + t d - c|^2 = r^2, with |d| = 1
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = -b - sqrt_disc;
    let far = -b + sqrt_disc;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

pub fn lerp_point(from: &Point3<f64>, to: &Point3<f64>, t: f64) -> Point3<f64> {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_path_endpoints() {
        let pts: Vec<_> =
            path_iter_parametric(|t: f32| Point3::new(t, 2.0 * t, 0.0), 1.0, 3.0, 4).collect();
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[0], Point3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(pts[2], Point3::new(2.0, 4.0, 0.0));
        assert_relative_eq!(pts[4], Point3::new(3.0, 6.0, 0.0));
    }

    #[test]
    fn test_annulus_shape() {
        let (coords, faces) = annulus(49.9, 50.0, 100);
        assert_eq!(coords.len(), 202);
        assert_eq!(faces.len(), 200);

        for (i, pt) in coords.iter().enumerate() {
            let expected = if i % 2 == 0 { 49.9 } else { 50.0 };
            assert_relative_eq!(pt.coords.norm(), expected, max_relative = 1e-5);
            assert_eq!(pt.y, 0.0);
        }

        let max_index = faces
            .iter()
            .flat_map(|f| [f.x, f.y, f.z])
            .max()
            .unwrap();
        assert_eq!(max_index as usize, coords.len() - 1);
    }

    #[test]
    fn test_ray_sphere() {
        let origin = Point3::new(0.0, 0.0, 10.0);
        let toward = Unit::new_normalize(Vector3::new(0.0, 0.0, -1.0));
        let away = Unit::new_normalize(Vector3::new(0.0, 0.0, 1.0));
        let center = Point3::origin();

        assert_relative_eq!(
            ray_sphere_intersection(&origin, &toward, &center, 2.0).unwrap(),
            8.0
        );
        assert_eq!(ray_sphere_intersection(&origin, &away, &center, 2.0), None);

        // Glancing miss
        let offset = Point3::new(2.5, 0.0, 10.0);
        assert_eq!(ray_sphere_intersection(&offset, &toward, &center, 2.0), None);

        // From inside, we hit the far wall
        assert_relative_eq!(
            ray_sphere_intersection(&center, &away, &center, 2.0).unwrap(),
            2.0
        );
    }

    #[test]
    fn test_lerp() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, -20.0, 5.0);
        assert_relative_eq!(lerp_point(&a, &b, 0.1), Point3::new(1.0, -2.0, 0.5));
        assert_relative_eq!(lerp_point(&a, &b, 1.0), b);
    }
}
