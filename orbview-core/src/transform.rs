/// 4x4 transformation matrices and rotation state
///
/// Matrices are built row by row (`m[(row, col)]`) and composed right to left:
/// `Transform::multiply(a, b)` applies `b` first, then `a`.
use nalgebra::Matrix4;

/// Rotation state around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f32> {
        Matrix4::identity()
    }

    /// Create a translation matrix
    #[rustfmt::skip]
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, dx,
            0.0, 1.0, 0.0, dy,
            0.0, 0.0, 1.0, dz,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a scale matrix
    #[rustfmt::skip]
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new(
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the X axis, angle in degrees
    #[rustfmt::skip]
    pub fn rotation_x(degrees: f32) -> Matrix4<f32> {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Y axis, angle in degrees
    #[rustfmt::skip]
    pub fn rotation_y(degrees: f32) -> Matrix4<f32> {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix4::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Z axis, angle in degrees
    #[rustfmt::skip]
    pub fn rotation_z(degrees: f32) -> Matrix4<f32> {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix4::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Combined object rotation, X applied last and Z first
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        Self::rotation_x(rotation.x) * Self::rotation_y(rotation.y) * Self::rotation_z(rotation.z)
    }

    /// `a * b`: transforms by `b` first, then by `a`
    pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
        a * b
    }

    pub fn transpose(m: &Matrix4<f32>) -> Matrix4<f32> {
        m.transpose()
    }

    /// Flatten column by column, the layout GLSL `mat4` uniforms expect
    pub fn flatten_column_major(m: &Matrix4<f32>) -> [f32; 16] {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = m[(row, col)];
            }
        }
        out
    }

    /// Rebuild a matrix from the output of [`Transform::flatten_column_major`]
    pub fn from_column_major(values: &[f32; 16]) -> Matrix4<f32> {
        Matrix4::from_column_slice(values)
    }
}
