//! # Mesh Store
//!
//! Holds the rest pose of the loaded mesh next to the animated copy that is rewritten on every
//! running tick. The rest pose is fixed at construction; the animated arrays are always derived
//! from it and from the simulation time, never from their own previous contents.

use nalgebra_glm as glm;

use crate::error::Result;
use crate::mesh::{self, TriangleMesh};
use crate::wave;

pub struct MeshStore {
    rest_vertices: Vec<glm::Vec3>,
    rest_normals: Vec<glm::Vec3>,
    faces: Vec<[u32; 3]>,
    vertices: Vec<glm::Vec3>,
    normals: Vec<glm::Vec3>,
}

impl MeshStore {
    /// Takes ownership of a loaded mesh and derives its rest normals.
    ///
    /// Fails for empty meshes or out-of-range faces, so a store always has something to draw.
    pub fn new(mesh: TriangleMesh) -> Result<Self> {
        mesh.validate()?;
        let TriangleMesh { vertices, faces } = mesh;
        let normals = mesh::vertex_normals(&vertices, &faces);

        Ok(Self {
            rest_vertices: vertices.clone(),
            rest_normals: normals.clone(),
            faces,
            vertices,
            normals,
        })
    }

    /// Rebuilds the animated mesh for `time` from the rest pose.
    pub fn animate(&mut self, time: f32) {
        wave::displace(
            &self.rest_vertices,
            &self.rest_normals,
            time,
            &mut self.vertices,
        );
        mesh::accumulate_vertex_normals(&self.vertices, &self.faces, &mut self.normals);
    }

    pub fn vertices(&self) -> &[glm::Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[glm::Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn rest_vertices(&self) -> &[glm::Vec3] {
        &self.rest_vertices
    }

    pub fn rest_normals(&self) -> &[glm::Vec3] {
        &self.rest_normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::mesh::octahedron;

    #[test]
    fn starts_at_rest_pose() {
        let store = MeshStore::new(octahedron()).unwrap();
        assert_eq!(store.vertices(), store.rest_vertices());
        assert_eq!(store.normals(), store.rest_normals());
        assert_eq!(store.vertex_count(), 6);
        assert_eq!(store.face_count(), 8);
    }

    #[test]
    fn animation_is_a_pure_function_of_time() {
        let mut store = MeshStore::new(octahedron()).unwrap();

        store.animate(0.31);
        let first = (store.vertices().to_vec(), store.normals().to_vec());

        store.animate(1.7);
        store.animate(0.31);
        assert_eq!(store.vertices(), first.0.as_slice());
        assert_eq!(store.normals(), first.1.as_slice());
    }

    #[test]
    fn rest_pose_is_never_touched() {
        let mut store = MeshStore::new(octahedron()).unwrap();
        let rest = store.rest_vertices().to_vec();
        store.animate(0.5);
        assert_eq!(store.rest_vertices(), rest.as_slice());
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let result = MeshStore::new(TriangleMesh::default());
        assert!(matches!(result, Err(MeshError::Empty)));
    }
}
