use nalgebra::Point3;

/// Something in the rendering engine's scene graph that the model can move around.
pub trait Visual {
    fn set_position(&mut self, position: Point3<f64>);
    /// Rotation about the vertical axis, in radians.
    fn set_spin(&mut self, angle: f64);
    fn set_visible(&mut self, visible: bool);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records what was last pushed into it.
    #[derive(Debug, Clone, PartialEq)]
    pub struct FakeVisual {
        pub position: Point3<f64>,
        pub spin: f64,
        pub visible: bool,
        pub updates: usize,
    }

    impl Default for FakeVisual {
        fn default() -> Self {
            FakeVisual {
                position: Point3::origin(),
                spin: 0.0,
                visible: true,
                updates: 0,
            }
        }
    }

    impl Visual for FakeVisual {
        fn set_position(&mut self, position: Point3<f64>) {
            self.position = position;
            self.updates += 1;
        }

        fn set_spin(&mut self, angle: f64) {
            self.spin = angle;
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }
}
