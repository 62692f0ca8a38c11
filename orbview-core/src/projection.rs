/// Perspective projection into the canonical view volume
use nalgebra::Matrix4;

use crate::error::{Error, Result};

/// Right-handed perspective projection mapping depth into `[-1, 1]`.
///
/// `fov_y` is the vertical field of view in degrees. Parameters are not checked:
/// a field of view outside `(0, 180)`, `near <= 0` or `far <= near` yield a
/// degenerate matrix. Use [`try_perspective`] to reject them instead.
#[rustfmt::skip]
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let f = (std::f32::consts::FRAC_PI_2 - fov_y.to_radians() / 2.0).tan();
    let range_inv = 1.0 / (near - far);

    Matrix4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (near + far) * range_inv, 2.0 * far * near * range_inv,
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Checked variant of [`perspective`]
pub fn try_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Matrix4<f32>> {
    let finite = [fov_y, aspect, near, far].iter().all(|v| v.is_finite());
    if !finite || fov_y <= 0.0 || fov_y >= 180.0 || aspect <= 0.0 || near <= 0.0 || far <= near {
        return Err(Error::InvalidProjection {
            fov: fov_y,
            aspect,
            near,
            far,
        });
    }
    Ok(perspective(fov_y, aspect, near, far))
}
