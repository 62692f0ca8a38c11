/// Geometry containers handed to the rendering backends
use nalgebra::Vector3;

/// A triangle read back out of a [`Mesh`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Vector3<f32>; 3],
    /// Per-corner normals, present only when the mesh supplies all three
    pub normals: Option<[Vector3<f32>; 3]>,
}

impl Triangle {
    /// Calculate the face normal from the triangle's positions
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.positions;
        crate::vector::normalize(&(v1 - v0).cross(&(v2 - v0)))
    }

    /// Average of the corner normals, falling back to the face normal
    pub fn shading_normal(&self) -> Vector3<f32> {
        match self.normals {
            Some([a, b, c]) => crate::vector::normalize(&(a + b + c)),
            None => self.calculate_normal(),
        }
    }

    pub fn centroid(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.positions;
        (v0 + v1 + v2) / 3.0
    }
}

/// Flat, per-corner vertex attributes ready for upload.
///
/// Every vertex instance owns three floats in `positions`. `normals` (3 floats)
/// and `texcoords` (2 floats) are aligned with it when the source supplies them for
/// every corner; corners without those components add nothing, so the two arrays
/// may be shorter than the position array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertex instances (`positions.len() / 3`)
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// True when every vertex instance carries a normal
    pub fn has_normals(&self) -> bool {
        !self.is_empty() && self.normals.len() == self.positions.len()
    }

    /// True when every vertex instance carries a texture coordinate
    pub fn has_texcoords(&self) -> bool {
        !self.is_empty() && self.texcoords.len() / 2 == self.vertex_count()
    }

    /// Per-instance normals, substituting face normals when the source left gaps
    pub fn vertex_normals(&self) -> Vec<f32> {
        if self.has_normals() {
            return self.normals.clone();
        }
        let mut normals = Vec::with_capacity(self.positions.len());
        for triangle in self.triangles() {
            let n = triangle.calculate_normal();
            for _ in 0..3 {
                normals.extend_from_slice(n.as_slice());
            }
        }
        normals
    }

    /// Iterate over the triangles in emission order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let normals = self.has_normals().then_some(self.normals.as_slice());
        self.positions
            .chunks_exact(9)
            .enumerate()
            .map(move |(i, p)| Triangle {
                positions: corners(p),
                normals: normals.map(|n| corners(&n[i * 9..i * 9 + 9])),
            })
    }
}

fn corners(values: &[f32]) -> [Vector3<f32>; 3] {
    [
        Vector3::new(values[0], values[1], values[2]),
        Vector3::new(values[3], values[4], values[5]),
        Vector3::new(values[6], values[7], values[8]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> Mesh {
        Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            texcoords: Vec::new(),
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn test_counts() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.has_normals());
        assert!(!mesh.has_texcoords());
        assert!(Mesh::new().is_empty());
    }

    #[test]
    fn test_triangles_read_back() {
        let mesh = single_triangle();
        let tris: Vec<Triangle> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].positions[1], Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tris[0].shading_normal(), Vector3::z());
    }

    #[test]
    fn test_ragged_normals_fall_back_to_face_normal() {
        let mut mesh = single_triangle();
        mesh.normals.truncate(3);
        let tri = mesh.triangles().next().unwrap();
        assert!(tri.normals.is_none());
        assert!((tri.shading_normal() - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn test_vertex_normals_fill_gaps() {
        let mut mesh = single_triangle();
        assert_eq!(mesh.vertex_normals(), mesh.normals);

        mesh.normals.clear();
        let normals = mesh.vertex_normals();
        assert_eq!(normals.len(), mesh.positions.len());
        assert_eq!(&normals[6..9], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_centroid() {
        let tri = single_triangle().triangles().next().unwrap();
        let c = tri.centroid();
        assert!((c - Vector3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).norm() < 1e-6);
    }
}
