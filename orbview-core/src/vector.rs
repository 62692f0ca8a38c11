/// 3-component vector helpers used by the camera builder
use nalgebra::Vector3;

/// Lengths at or below this are treated as degenerate by [`normalize`]
pub const NORMALIZE_EPSILON: f32 = 1e-5;

/// Component-wise `a - b`
pub fn subtract(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a - b
}

/// Right-handed cross product
pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

/// Unit vector in the direction of `v`, or zero when `v` is (nearly) zero length
pub fn normalize(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(NORMALIZE_EPSILON)
        .unwrap_or_else(Vector3::zeros)
}
