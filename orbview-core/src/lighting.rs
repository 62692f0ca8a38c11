/// CPU reference of the viewer's per-pixel lighting
///
/// Mirrors the fragment program the web backend runs: Lambert diffuse plus a
/// Blinn half-vector specular term that only appears on lit surfaces.
use nalgebra::{Matrix3, Vector3};

use crate::scene::FrameUniforms;
use crate::transform::Transform;
use crate::vector::normalize;

/// Base surface colour (RGBA)
pub const SURFACE_COLOR: [f32; 4] = [0.2, 1.0, 0.2, 1.0];
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.6, 0.6];
pub const SPECULAR_COLOR: [f32; 3] = [1.0, 0.2, 0.2];

/// Lighting terms for one surface point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    /// `dot(normal, to_light)`, may be negative on the dark side
    pub diffuse: f32,
    pub specular: f32,
}

impl Shading {
    /// Final RGB colour for this point
    pub fn color(&self) -> [f32; 3] {
        let mut rgb = [0.0; 3];
        for (i, c) in rgb.iter_mut().enumerate() {
            *c = SURFACE_COLOR[i] * self.diffuse * LIGHT_COLOR[i]
                + self.specular * SPECULAR_COLOR[i];
        }
        rgb
    }

    /// Scalar brightness in `[0, 1]`
    pub fn intensity(&self) -> f32 {
        (self.diffuse.max(0.0) + self.specular).clamp(0.0, 1.0)
    }
}

/// Phong-style shading from the three direction vectors (need not be normalized)
pub fn phong(
    normal: &Vector3<f32>,
    surface_to_light: &Vector3<f32>,
    surface_to_view: &Vector3<f32>,
    shininess: f32,
) -> Shading {
    let normal = normalize(normal);
    let to_light = normalize(surface_to_light);
    let to_view = normalize(surface_to_view);
    let half = normalize(&(to_light + to_view));

    let diffuse = normal.dot(&to_light);
    let specular = if diffuse > 0.0 {
        normal.dot(&half).max(0.0).powf(shininess)
    } else {
        0.0
    };
    Shading { diffuse, specular }
}

/// Shade a model-space point and normal with the frame's uniforms
pub fn shade(uniforms: &FrameUniforms, position: &Vector3<f32>, normal: &Vector3<f32>) -> Shading {
    let world = Transform::from_column_major(&uniforms.world);
    let light_rotation = upper_3x3(&uniforms.light_rotation);

    // the normal goes through the full world matrix, as the vertex program does
    let world_normal = (world * normal.push(1.0)).xyz();
    let surface = upper_3x3(&uniforms.world) * position;
    let light = light_rotation * Vector3::from(uniforms.light_position);
    let view = Vector3::from(uniforms.view_position);

    phong(&world_normal, &(light - surface), &(view - surface), uniforms.shininess)
}

fn upper_3x3(column_major: &[f32; 16]) -> Matrix3<f32> {
    Transform::from_column_major(column_major)
        .fixed_view::<3, 3>(0, 0)
        .into_owned()
}
