use nalgebra::{Point3, Vector3};

use crate::math::geometry::lerp_point;

// The chase camera backs off from the target by a fraction of its size
const CHASE_DISTANCE_FACTOR: f64 = 0.4;
const CHASE_BACKOFF: f64 = 1.5;

/// How the camera sits relative to the body it's following.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowStyle {
    /// Snap to a constant offset from the body every frame.
    Fixed { offset: Vector3<f64> },
    /// Glide toward a spot in front of the body that depends on its size, closing `blend` of
    /// the remaining gap each frame.
    Chase { blend: f64 },
}

impl FollowStyle {
    pub fn fixed() -> Self {
        FollowStyle::Fixed {
            offset: Vector3::new(0.0, 10.0, 20.0),
        }
    }

    pub fn chase() -> Self {
        FollowStyle::Chase { blend: 0.1 }
    }

    /// Where the camera should be this frame.
    pub fn eye(
        &self,
        current_eye: &Point3<f64>,
        target: &Point3<f64>,
        target_size: f64,
    ) -> Point3<f64> {
        match *self {
            FollowStyle::Fixed { offset } => target + offset,
            FollowStyle::Chase { blend } => {
                let distance = target_size * CHASE_DISTANCE_FACTOR;
                let goal = target + Vector3::new(0.0, 0.0, distance * CHASE_BACKOFF);
                lerp_point(current_eye, &goal, blend)
            }
        }
    }
}

/// Which body, if any, the camera is locked onto. We only hold the name; the body itself can
/// come and go independently.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusState {
    target: Option<String>,
    style: FollowStyle,
}

impl FocusState {
    pub fn new(style: FollowStyle) -> Self {
        FocusState {
            target: None,
            style,
        }
    }

    pub fn follow(&mut self, name: &str) {
        self.target = Some(name.to_owned());
    }

    pub fn release(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_free(&self) -> bool {
        self.target.is_none()
    }

    pub fn style(&self) -> &FollowStyle {
        &self.style
    }
}
