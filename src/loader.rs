//! # Raw Mesh Loader
//!
//! Reads triangle meshes stored in the raw binary layout used by the viewer's resource files:
//!
//! ```text
//! u32          vertex count (nv)
//! nv × [f32;3] vertex positions
//! u32          face count (nf)
//! nf × [u32;3] vertex indices per face
//! ```
//!
//! All values are little-endian and there is no header or padding. A file name that does not
//! exist as given is looked up again inside the resource directory.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra_glm as glm;

use crate::error::{MeshError, Result};
use crate::mesh::TriangleMesh;

/// Loads `file_name`, falling back to `resource_dir/file_name` when it does not exist as given.
pub fn load_triangle_mesh(
    file_name: impl AsRef<Path>,
    resource_dir: impl AsRef<Path>,
) -> Result<TriangleMesh> {
    let path = resolve(file_name.as_ref(), resource_dir.as_ref())?;
    log::info!("Read {}.", path.display());

    let mesh = load_raw(&path)?;
    log::info!("  #vertices {}", mesh.vertex_count());
    log::info!("  #faces    {}", mesh.face_count());
    Ok(mesh)
}

/// Picks the first existing candidate out of `file_name` and `resource_dir/file_name`.
pub fn resolve(file_name: &Path, resource_dir: &Path) -> Result<PathBuf> {
    if file_name.is_file() {
        return Ok(file_name.to_path_buf());
    }

    let fallback = resource_dir.join(file_name);
    if fallback.is_file() {
        log::debug!(
            "{} not found, using resource path {}",
            file_name.display(),
            fallback.display()
        );
        return Ok(fallback);
    }

    Err(MeshError::NotFound {
        primary: file_name.to_path_buf(),
        fallback,
    })
}

/// Reads and parses a raw mesh file.
pub fn load_raw(path: &Path) -> Result<TriangleMesh> {
    let bytes = fs::read(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_raw(&bytes)
}

/// Parses the raw mesh layout from memory.
pub fn parse_raw(bytes: &[u8]) -> Result<TriangleMesh> {
    let mut reader = Reader::new(bytes);

    let vertex_count = reader.read_u32()? as usize;
    reader.require(vertex_count.saturating_mul(12))?;
    let vertices = (0..vertex_count)
        .map(|_| -> Result<glm::Vec3> {
            Ok(glm::vec3(reader.read_f32()?, reader.read_f32()?, reader.read_f32()?))
        })
        .collect::<Result<Vec<_>>>()?;

    let face_count = reader.read_u32()? as usize;
    reader.require(face_count.saturating_mul(12))?;
    let faces = (0..face_count)
        .map(|_| -> Result<[u32; 3]> {
            Ok([reader.read_u32()?, reader.read_u32()?, reader.read_u32()?])
        })
        .collect::<Result<Vec<_>>>()?;

    if reader.remaining() > 0 {
        return Err(MeshError::TrailingData(reader.remaining()));
    }

    TriangleMesh::new(vertices, faces)
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Fails early when fewer than `count` bytes are left, so huge counts never allocate.
    fn require(&self, count: usize) -> Result<()> {
        if self.remaining() < count {
            return Err(MeshError::Truncated {
                expected: self.offset.saturating_add(count),
                found: self.bytes.len(),
            });
        }
        Ok(())
    }

    fn take4(&mut self) -> Result<[u8; 4]> {
        self.require(4)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[self.offset..self.offset + 4]);
        self.offset += 4;
        Ok(word)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.take4().map(u32::from_le_bytes)
    }

    fn read_f32(&mut self) -> Result<f32> {
        self.take4().map(f32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::mesh::octahedron;

    fn encode(mesh: &TriangleMesh) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(mesh.vertices.len() as u32).to_le_bytes());
        for v in &mesh.vertices {
            for c in v.iter() {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&(mesh.faces.len() as u32).to_le_bytes());
        for face in &mesh.faces {
            for i in face {
                bytes.extend_from_slice(&i.to_le_bytes());
            }
        }
        bytes
    }

    #[test]
    fn parses_octahedron() {
        let mesh = parse_raw(&encode(&octahedron())).unwrap();
        assert_eq!(mesh, octahedron());
    }

    #[test]
    fn truncated_vertices_fail() {
        let mut bytes = encode(&octahedron());
        bytes.truncate(20);
        assert!(matches!(parse_raw(&bytes), Err(MeshError::Truncated { .. })));
    }

    #[test]
    fn absurd_counts_fail_without_allocating() {
        let bytes = u32::MAX.to_le_bytes();
        assert!(matches!(parse_raw(&bytes), Err(MeshError::Truncated { .. })));
    }

    #[test]
    fn trailing_bytes_fail() {
        let mut bytes = encode(&octahedron());
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(parse_raw(&bytes), Err(MeshError::TrailingData(2))));
    }

    #[test]
    fn out_of_range_index_fails() {
        let mut mesh = octahedron();
        mesh.faces[2] = [0, 1, 6];
        assert!(matches!(
            parse_raw(&encode(&mesh)),
            Err(MeshError::IndexOutOfRange { face: 2, index: 6, .. })
        ));
    }

    #[test]
    fn empty_mesh_fails() {
        let bytes = [0u8; 8];
        assert!(matches!(parse_raw(&bytes), Err(MeshError::Empty)));
    }

    #[test]
    fn falls_back_to_resource_dir() {
        let resources = tempfile::tempdir().unwrap();
        let name = "octahedron_fallback_test.raw";
        let mut file = fs::File::create(resources.path().join(name)).unwrap();
        file.write_all(&encode(&octahedron())).unwrap();

        let mesh = load_triangle_mesh(name, resources.path()).unwrap();
        assert_eq!(mesh, octahedron());
    }

    #[test]
    fn prefers_path_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("primary.raw");
        fs::write(&primary, encode(&octahedron())).unwrap();

        let resources = tempfile::tempdir().unwrap();
        assert_eq!(resolve(&primary, resources.path()).unwrap(), primary);
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let resources = tempfile::tempdir().unwrap();
        let result = load_triangle_mesh("does_not_exist.raw", resources.path());
        match result {
            Err(MeshError::NotFound { primary, fallback }) => {
                assert_eq!(primary, PathBuf::from("does_not_exist.raw"));
                assert_eq!(fallback, resources.path().join("does_not_exist.raw"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
