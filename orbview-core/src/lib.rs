/// orbview core library - stateless geometry and transformation logic
///
/// Matrix and camera math, per-frame scene composition, the OBJ parser and the
/// input state machine shared by the web and terminal viewers.

pub mod assets;
pub mod camera;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod obj;
pub mod projection;
pub mod scene;
pub mod settings;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use assets::{Model, ModelLibrary};
pub use camera::{inverse_look_at, look_at, Camera};
pub use controls::{Command, ViewerControls};
pub use error::{Error, MeshParseError, MeshParseErrorKind, Result};
pub use geometry::{Mesh, Triangle};
pub use obj::parse_obj;
pub use projection::{perspective, try_perspective};
pub use scene::{
    build_world_matrix, build_world_view_projection_matrix, frame_uniforms, FrameUniforms,
    SceneState,
};
pub use settings::{Setting, ViewerSettings};
pub use transform::{RotationState, Transform};
