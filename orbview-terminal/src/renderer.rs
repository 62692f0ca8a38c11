/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use orbview_core::{lighting, FrameUniforms, Mesh, Transform, Triangle};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 0.5;

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    /// Aspect ratio of the drawable area in pixels
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32 * CELL_ASPECT
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, uniforms: &FrameUniforms) {
        let wvp = Transform::from_column_major(&uniforms.world_view_projection);
        for triangle in mesh.triangles() {
            self.render_triangle(&triangle, &wvp, uniforms);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        wvp: &Matrix4<f32>,
        uniforms: &FrameUniforms,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, position) in screen_coords.iter_mut().zip(triangle.positions.iter()) {
            match self.project(wvp, position) {
                Some(coords) => *slot = coords,
                None => return, // Behind the camera
            }
        }

        let shading = lighting::shade(uniforms, &triangle.centroid(), &triangle.shading_normal());

        // Map brightness to character, keeping lit-but-dim faces visible
        let brightness = shading.intensity();
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle(&screen_coords, character);
    }

    /// Clip-space transform, perspective divide and viewport mapping.
    ///
    /// Corners outside the view volume are kept; x and y are clipped by the
    /// screen bounds and depth per cell in [`Self::rasterize_triangle`].
    fn project(&self, wvp: &Matrix4<f32>, position: &Vector3<f32>) -> Option<(f32, f32, f32)> {
        let clip = wvp * position.push(1.0);

        // Prevent division by near-zero or behind-camera w
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        let screen_x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        Some((screen_x, screen_y, ndc.z))
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let corners = ((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1));
                let Some((w0, w1, w2)) = barycentric(corners.0, corners.1, corners.2, (px, py))
                else {
                    return;
                };
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                    if !(-1.0..=1.0).contains(&depth) {
                        continue;
                    }

                    let idx = y as usize * self.width + x as usize;
                    if depth < self.depth_buffer[idx] {
                        self.depth_buffer[idx] = depth;
                        self.char_buffer[idx] = character;
                    }
                }
            }
        }
    }

    pub fn covered_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGreen,
                    '-' | '=' => Color::Green,
                    '+' | '*' => Color::Yellow,
                    '#' | '%' | '@' => Color::Red,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbview_core::{frame_uniforms, ModelLibrary, ViewerControls, ViewerSettings};

    fn uniforms(renderer: &AsciiRenderer) -> FrameUniforms {
        let state = ViewerControls::new().snapshot(&ViewerSettings::default(), renderer.aspect());
        frame_uniforms(&state)
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn test_barycentric_inside() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_renders_cube_into_buffer() {
        let library = ModelLibrary::builtin();
        let mut renderer = AsciiRenderer::new(120, 40);
        let uniforms = uniforms(&renderer);
        renderer.render_mesh(&library.get(0).unwrap().mesh, &uniforms);
        assert!(renderer.covered_cells() > 0);

        renderer.clear();
        assert_eq!(renderer.covered_cells(), 0);
    }

    fn clip_space_uniforms(wvp: Matrix4<f32>) -> FrameUniforms {
        FrameUniforms {
            world_view_projection: Transform::flatten_column_major(&wvp),
            world: Transform::flatten_column_major(&Matrix4::identity()),
            light_rotation: Transform::flatten_column_major(&Matrix4::identity()),
            light_position: [0.0, 0.0, 10.0],
            view_position: [0.0, 0.0, 10.0],
            shininess: 150.0,
        }
    }

    fn triangle_mesh(z: f32) -> Mesh {
        Mesh {
            positions: vec![-3.0, -3.0, z, 3.0, -3.0, z, 0.0, 3.0, z],
            texcoords: Vec::new(),
            normals: Vec::new(),
        }
    }

    #[test]
    fn test_triangle_leaving_the_screen_is_clipped_not_dropped() {
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.render_mesh(&triangle_mesh(0.0), &clip_space_uniforms(Matrix4::identity()));
        assert!(renderer.covered_cells() > 0);
        assert!(renderer.char_buffer[5 * 20 + 10] != ' ');
    }

    #[test]
    fn test_triangle_behind_camera_is_dropped() {
        let mut flip_w = Matrix4::identity();
        flip_w[(3, 3)] = -1.0;
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.render_mesh(&triangle_mesh(0.0), &clip_space_uniforms(flip_w));
        assert_eq!(renderer.covered_cells(), 0);
    }

    #[test]
    fn test_cells_beyond_far_plane_are_skipped() {
        let mut renderer = AsciiRenderer::new(20, 10);
        renderer.render_mesh(&triangle_mesh(2.0), &clip_space_uniforms(Matrix4::identity()));
        assert_eq!(renderer.covered_cells(), 0);
    }

    #[test]
    fn test_draw_emits_every_cell() {
        let renderer = AsciiRenderer::new(4, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\r\n"));
    }
}
