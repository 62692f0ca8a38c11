/// Camera frame construction and view matrices
use nalgebra::{Matrix4, Vector3};

use crate::transform::Transform;
use crate::vector::{cross, normalize, subtract};

/// Camera-to-world matrix for a camera at `eye` looking at `target`.
///
/// Columns 0..3 hold the camera's x, y and z axes, column 3 holds `eye`.
/// If `up` is parallel to the viewing direction the x axis collapses to zero.
#[rustfmt::skip]
pub fn look_at(eye: &Vector3<f32>, target: &Vector3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
    let z_axis = normalize(&subtract(eye, target));
    let x_axis = normalize(&cross(up, &z_axis));
    let y_axis = cross(&z_axis, &x_axis);

    Matrix4::new(
        x_axis.x, y_axis.x, z_axis.x, eye.x,
        x_axis.y, y_axis.y, z_axis.y, eye.y,
        x_axis.z, y_axis.z, z_axis.z, eye.z,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Inverse of a [`look_at`] matrix.
///
/// Only valid when the upper-left 3x3 block is orthonormal: the rotation is
/// inverted by transposing it and the translation by negating it.
pub fn inverse_look_at(m: &Matrix4<f32>) -> Matrix4<f32> {
    let t = Transform::translation(-m[(0, 3)], -m[(1, 3)], -m[(2, 3)]);

    let mut r = Transform::identity();
    r.fixed_view_mut::<3, 3>(0, 0)
        .copy_from(&m.fixed_view::<3, 3>(0, 0));

    Transform::multiply(&Transform::transpose(&r), &t)
}

/// Orbiting camera: a look-at frame that can be swung about the world axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Pivot angles in degrees about the world X and Y axes
    pub pivot_x: f32,
    pub pivot_y: f32,
}

impl Camera {
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            target: Vector3::zeros(),
            up: Vector3::y(),
            pivot_x: 0.0,
            pivot_y: 0.0,
        }
    }

    /// Camera-to-world matrix, pivoted about X first and then Y
    pub fn camera_matrix(&self) -> Matrix4<f32> {
        let base = look_at(&self.position, &self.target, &self.up);
        let pitched = Transform::multiply(&Transform::rotation_x(self.pivot_x), &base);
        Transform::multiply(&Transform::rotation_y(self.pivot_y), &pitched)
    }

    /// Create the view matrix (world-to-camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        inverse_look_at(&self.camera_matrix())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 40.0, 135.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    fn approx_eq(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        (a - b).norm() < 1e-4
    }

    #[test]
    fn test_look_at_frame_is_orthonormal() {
        let m = look_at(
            &Vector3::new(3.0, 4.0, 12.0),
            &Vector3::zeros(),
            &Vector3::y(),
        );
        let r = m.fixed_view::<3, 3>(0, 0).into_owned();
        assert!((r.transpose() * r - nalgebra::Matrix3::identity()).norm() < 1e-5);
        assert_eq!(m[(0, 3)], 3.0);
        assert_eq!(m[(2, 3)], 12.0);
        assert_eq!(m.row(3).into_owned(), nalgebra::RowVector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_look_at_z_axis_points_back_to_eye() {
        let m = look_at(&Vector3::new(0.0, 0.0, 5.0), &Vector3::zeros(), &Vector3::y());
        assert!(approx_eq(&m, &Transform::translation(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_look_at_parallel_up_collapses_x_axis() {
        let m = look_at(&Vector3::new(0.0, 5.0, 0.0), &Vector3::zeros(), &Vector3::y());
        assert_eq!(m.column(0).xyz(), Vector3::zeros());
        assert!(m.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_inverse_look_at_cancels() {
        for eye in [
            Vector3::new(0.0, 40.0, 135.0),
            Vector3::new(-7.0, 2.0, 3.0),
            Vector3::new(10.0, -10.0, -1.0),
        ] {
            let m = look_at(&eye, &Vector3::new(1.0, 0.5, 0.0), &Vector3::y());
            let product = Transform::multiply(&inverse_look_at(&m), &m);
            assert!(approx_eq(&product, &Transform::identity()));
        }
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let mut camera = Camera::new(Vector3::new(0.0, 40.0, 135.0));
        camera.pivot_x = 12.0;
        camera.pivot_y = -30.0;

        // the pivoted eye is column 3 of the camera matrix
        let eye = camera.camera_matrix().column(3).into_owned();
        let in_view = camera.view_matrix() * eye;
        assert!((in_view - Vector4::new(0.0, 0.0, 0.0, 1.0)).norm() < 1e-3);
    }

    #[test]
    fn test_view_matrix_puts_target_in_front() {
        let camera = Camera::default();
        let target = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(target.z < 0.0);
        assert!(target.x.abs() < 1e-4 && target.y.abs() < 1e-3);
    }
}
