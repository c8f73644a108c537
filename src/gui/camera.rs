use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{
    Isometry3, Matrix4, Perspective3, Point2, Point3, Unit, Vector2, Vector3, Vector4,
};

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// This camera is a close cousin of ArcBall. It can be click-and-dragged to adjust its pitch
// and yaw around a target point, and scrolled to zoom in and out. Unlike ArcBall, the scene
// can also take the camera over: `look_from` puts it at an arbitrary eye position looking at
// an arbitrary point, and the user's controls can be switched off entirely.
//
// The camera uses the y-axis as up. Position is stored in spherical coordinates around the
// target, so that user input after a takeover continues smoothly from wherever the scene left
// the camera.
pub struct OrbitCamera {
    // -- position --
    target: Point3<f32>,
    theta: f32,  // azimuthal angle, from +z toward +x
    phi: f32,    // polar angle, from +y
    radius: f32, // distance from target
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    controls_enabled: bool,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
}

impl OrbitCamera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        let mut camera = OrbitCamera {
            target,
            theta: 0.0,
            phi: PI / 2.0,
            radius: 1.0,
            width: 800,
            height: 600,
            fovy: 85f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
            last_cursor_pos: Vector2::zeros(),
            controls_enabled: true,
            theta_step: 0.005,
            phi_step: 0.005,
            scroll_ratio: 1.1,
            phi_limit: 0.001,
            radius_limits: (0.1, 1000.0),
        };
        camera.look_from(eye, target);
        camera
    }

    pub fn with_distance_limits(mut self, min_dist: f32, max_dist: f32) -> Self {
        self.radius_limits = (min_dist, max_dist);
        self.radius = nalgebra::clamp(self.radius, min_dist, max_dist);
        self
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    /// Moves the camera to `eye`, pointing at `target`. The distance limits only apply to
    /// the user's zooming, not to this.
    pub fn look_from(&mut self, eye: Point3<f32>, target: Point3<f32>) {
        self.target = target;

        let offset = eye - target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            // Keep the old direction; there's no information in a zero offset
            self.radius = f32::EPSILON;
            return;
        }

        self.radius = radius;
        self.phi = nalgebra::clamp(
            (offset.y / radius).acos(),
            self.phi_limit,
            PI - self.phi_limit,
        );
        self.theta = offset.x.atan2(offset.z);
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// The ray from the near clipping plane through the given pixel, in world space.
    /// Pixel coordinates start at the top left of the window.
    pub fn ray_through(&self, cursor: &Point2<f32>) -> Option<(Point3<f32>, Unit<Vector3<f32>>)> {
        let x = 2.0 * cursor.x / self.width as f32 - 1.0;
        let y = 1.0 - 2.0 * cursor.y / self.height as f32;

        let inverse = self.inverse_transformation();
        let near = Point3::from_homogeneous(inverse * Vector4::new(x, y, -1.0, 1.0))?;
        let far = Point3::from_homogeneous(inverse * Vector4::new(x, y, 1.0, 1.0))?;
        Some((near, Unit::new_normalize(far - near)))
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        // The window size matters even when the user isn't allowed to steer
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w;
            self.height = h;
            return;
        }

        if !self.controls_enabled {
            return;
        }

        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    let dpos = curr_pos - self.last_cursor_pos;
                    self.rotate(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(KEY_ZOOM_STEP.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.target
            + self.radius
                * Vector3::new(
                    self.phi.sin() * self.theta.sin(),
                    self.phi.cos(),
                    self.phi.sin() * self.theta.cos(),
                )
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_look_from_round_trip() {
        let eye = Point3::new(-20.0, 100.0, 90.0);
        let target = Point3::new(5.0, 5.0, 5.0);
        let camera = OrbitCamera::new(eye, target);
        assert_relative_eq!(camera.eye(), eye, max_relative = 1e-5);
        assert_relative_eq!(camera.radius, (eye - target).norm(), max_relative = 1e-6);

        let mut camera = OrbitCamera::new(Point3::new(0.0, 0.0, 100.0), Point3::origin());
        assert_relative_eq!(camera.eye(), Point3::new(0.0, 0.0, 100.0), epsilon = 1e-4);

        camera.look_from(Point3::new(50.0, 10.0, 20.0), Point3::new(50.0, 0.0, 0.0));
        assert_relative_eq!(camera.eye(), Point3::new(50.0, 10.0, 20.0), epsilon = 1e-4);
        assert_eq!(camera.target, Point3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut camera = OrbitCamera::new(Point3::new(0.0, 0.0, 100.0), Point3::origin())
            .with_distance_limits(12.0, 1000.0);
        for _ in 0..100 {
            camera.zoom(0.5);
        }
        assert_relative_eq!(camera.radius, 12.0);
        for _ in 0..100 {
            camera.zoom(2.0);
        }
        assert_relative_eq!(camera.radius, 1000.0);
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut camera = OrbitCamera::new(Point3::new(0.0, 0.0, 100.0), Point3::origin());
        camera.rotate(1.0, -0.5);
        assert_relative_eq!(camera.eye().coords.norm(), 100.0, max_relative = 1e-5);

        // Can't flip over the pole
        camera.rotate(0.0, -10.0);
        assert!(camera.eye().y < 100.0);
        assert!(camera.eye().y > 99.0);
    }

    #[test]
    fn test_ray_through_center() {
        let eye = Point3::new(0.0, 10.0, 10.0);
        let camera = OrbitCamera::new(eye, Point3::origin());
        let (origin, direction) = camera.ray_through(&Point2::new(400.0, 300.0)).unwrap();

        let expected = (Point3::origin() - eye).normalize();
        assert_relative_eq!(direction.into_inner(), expected, epsilon = 1e-3);
        // The ray starts on the near plane, just in front of the eye
        assert_relative_eq!((origin - eye).norm(), 0.1, epsilon = 1e-2);
    }
}
