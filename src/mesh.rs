//! # Triangle Mesh
//!
//! Indexed triangle mesh geometry and the geometric helpers the viewer needs on top of it:
//! per-vertex normals recomputed from positions and faces, and the unique edge list used by the
//! wireframe overlay.
//!
//! Positions are stored as `nalgebra_glm::Vec3`, which is `#[repr(C)]` and `bytemuck::Pod`, so a
//! `&[Vec3]` can be handed to `wgpu` as raw bytes without repacking.

use nalgebra_glm as glm;

use crate::error::{MeshError, Result};

/// Vertex positions plus triangle faces, as read from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<glm::Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<glm::Vec3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks that the mesh is non-empty and that every face index refers to a vertex.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() || self.faces.is_empty() {
            return Err(MeshError::Empty);
        }
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Computes one normal per vertex by accumulating the unit normals of its incident faces,
/// each weighted by the interior angle of the face at that vertex.
///
/// Faces with zero area contribute nothing. A vertex without any usable incident face gets the
/// zero vector.
pub fn vertex_normals(vertices: &[glm::Vec3], faces: &[[u32; 3]]) -> Vec<glm::Vec3> {
    let mut normals = vec![glm::Vec3::zeros(); vertices.len()];
    accumulate_vertex_normals(vertices, faces, &mut normals);
    normals
}

/// In-place variant of [`vertex_normals`] that reuses the output allocation.
///
/// `normals` is resized to the vertex count and fully overwritten.
pub fn accumulate_vertex_normals(
    vertices: &[glm::Vec3],
    faces: &[[u32; 3]],
    normals: &mut Vec<glm::Vec3>,
) {
    normals.clear();
    normals.resize(vertices.len(), glm::Vec3::zeros());

    for face in faces {
        let p = face.map(|i| vertices[i as usize]);
        let Some(face_normal) = try_normalize(&glm::cross(&(p[1] - p[0]), &(p[2] - p[0]))) else {
            continue;
        };

        for corner in 0..3 {
            let e1 = p[(corner + 1) % 3] - p[corner];
            let e2 = p[(corner + 2) % 3] - p[corner];
            normals[face[corner] as usize] += corner_angle(&e1, &e2) * face_normal;
        }
    }

    for normal in normals.iter_mut() {
        *normal = try_normalize(normal).unwrap_or_else(glm::Vec3::zeros);
    }
}

/// Unique undirected edges of the face list, sorted, as vertex index pairs `[low, high]`.
pub fn unique_edges(faces: &[[u32; 3]]) -> Vec<[u32; 2]> {
    let mut edges: Vec<[u32; 2]> = faces
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
        .map(|[i, j]| [i.min(j), i.max(j)])
        .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

fn try_normalize(v: &glm::Vec3) -> Option<glm::Vec3> {
    let length = glm::length(v);
    (length > f32::EPSILON * f32::EPSILON && length.is_finite()).then(|| *v / length)
}

fn corner_angle(e1: &glm::Vec3, e2: &glm::Vec3) -> f32 {
    match (try_normalize(e1), try_normalize(e2)) {
        (Some(a), Some(b)) => glm::dot(&a, &b).clamp(-1.0, 1.0).acos(),
        _ => 0.0,
    }
}

#[cfg(test)]
pub(crate) fn octahedron() -> TriangleMesh {
    TriangleMesh {
        vertices: vec![
            glm::vec3(1.0, 0.0, 0.0),
            glm::vec3(-1.0, 0.0, 0.0),
            glm::vec3(0.0, 1.0, 0.0),
            glm::vec3(0.0, -1.0, 0.0),
            glm::vec3(0.0, 0.0, 1.0),
            glm::vec3(0.0, 0.0, -1.0),
        ],
        faces: vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn closed_mesh_normals_are_unit_length() {
        let mesh = octahedron();
        let normals = vertex_normals(&mesh.vertices, &mesh.faces);

        assert_eq!(normals.len(), mesh.vertex_count());
        for normal in &normals {
            assert_relative_eq!(glm::length(normal), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn octahedron_normals_point_outward() {
        let mesh = octahedron();
        let normals = vertex_normals(&mesh.vertices, &mesh.faces);

        for (vertex, normal) in mesh.vertices.iter().zip(&normals) {
            assert_relative_eq!(glm::dot(vertex, normal), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn degenerate_faces_do_not_produce_nan() {
        let vertices = vec![
            glm::vec3(0.0, 0.0, 0.0),
            glm::vec3(1.0, 0.0, 0.0),
            glm::vec3(2.0, 0.0, 0.0),
            glm::vec3(5.0, 5.0, 5.0),
        ];
        let faces = vec![[0, 1, 2], [0, 0, 1]];
        let normals = vertex_normals(&vertices, &faces);

        assert!(normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
        assert_eq!(normals[3], glm::Vec3::zeros());
    }

    #[test]
    fn accumulate_overwrites_previous_contents() {
        let mesh = octahedron();
        let mut normals = vec![glm::vec3(9.0, 9.0, 9.0); 2];
        accumulate_vertex_normals(&mesh.vertices, &mesh.faces, &mut normals);

        assert_eq!(normals, vertex_normals(&mesh.vertices, &mesh.faces));
    }

    #[test]
    fn octahedron_has_twelve_edges() {
        let edges = unique_edges(&octahedron().faces);
        assert_eq!(edges.len(), 12);
        assert!(edges.iter().all(|[a, b]| a < b));
    }

    #[test]
    fn validate_rejects_bad_meshes() {
        assert!(matches!(
            TriangleMesh::new(vec![], vec![]),
            Err(MeshError::Empty)
        ));

        let result = TriangleMesh::new(vec![glm::Vec3::zeros(); 3], vec![[0, 1, 3]]);
        assert!(matches!(
            result,
            Err(MeshError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            })
        ));
    }
}
