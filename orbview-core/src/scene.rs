/// Per-frame scene composition: world, view and projection
///
/// Everything here is a pure function of a [`SceneState`] snapshot; nothing is
/// cached between frames.
use nalgebra::{Matrix4, Vector3};

use crate::camera::Camera;
use crate::projection::perspective;
use crate::transform::{RotationState, Transform};

/// Uniform scale applied to every model
pub const WORLD_SCALE: f32 = 10.0;

/// Light position before it is swung around the Y axis
pub const LIGHT_X: f32 = 20.0;
pub const LIGHT_Z: f32 = 60.0;

/// Height of the eye used for specular highlights
pub const VIEW_HEIGHT: f32 = 40.0;

/// Immutable snapshot of everything the transforms depend on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Object rotation in degrees
    pub object_rotation: RotationState,
    pub y_translate: f32,
    pub camera_position: Vector3<f32>,
    /// Orbit angles in degrees applied to the camera frame
    pub camera_pivot_x: f32,
    pub camera_pivot_y: f32,
    /// Light rotation about Y in degrees
    pub light_rotation: f32,
    pub light_height: f32,
    pub shininess: f32,
}

impl SceneState {
    pub fn camera(&self) -> Camera {
        Camera {
            pivot_x: self.camera_pivot_x,
            pivot_y: self.camera_pivot_y,
            ..Camera::new(self.camera_position)
        }
    }
}

/// Everything a backend uploads for one draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Column-major
    pub world_view_projection: [f32; 16],
    /// Column-major
    pub world: [f32; 16],
    /// Column-major
    pub light_rotation: [f32; 16],
    pub light_position: [f32; 3],
    pub view_position: [f32; 3],
    pub shininess: f32,
}

/// Object transform: scale, then Z, Y and X rotation, then lift along Y
pub fn build_world_matrix(
    rot_x: f32,
    rot_y: f32,
    rot_z: f32,
    y_translate: f32,
    scale: f32,
) -> Matrix4<f32> {
    let rotation = Transform::rotation_matrix(&RotationState::new(rot_x, rot_y, rot_z));
    let world = Transform::multiply(&Transform::translation(0.0, y_translate, 0.0), &rotation);
    Transform::multiply(&world, &Transform::scale(scale, scale, scale))
}

fn world_matrix(state: &SceneState) -> Matrix4<f32> {
    let rot = state.object_rotation;
    build_world_matrix(rot.x, rot.y, rot.z, state.y_translate, WORLD_SCALE)
}

/// Full clip-space transform for the frame, flattened column-major
pub fn build_world_view_projection_matrix(state: &SceneState) -> [f32; 16] {
    let projection = perspective(state.fov, state.aspect, state.near, state.far);
    let view = state.camera().view_matrix();
    let view_projection = Transform::multiply(&projection, &view);
    let world_view_projection = Transform::multiply(&view_projection, &world_matrix(state));
    Transform::flatten_column_major(&world_view_projection)
}

/// Compose all per-frame uniforms
pub fn frame_uniforms(state: &SceneState) -> FrameUniforms {
    FrameUniforms {
        world_view_projection: build_world_view_projection_matrix(state),
        world: Transform::flatten_column_major(&world_matrix(state)),
        light_rotation: Transform::flatten_column_major(&Transform::rotation_y(
            state.light_rotation,
        )),
        light_position: [LIGHT_X, state.light_height, LIGHT_Z],
        view_position: [0.0, VIEW_HEIGHT, state.camera_position.z],
        shininess: state.shininess,
    }
}
