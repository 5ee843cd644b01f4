//! # Errors
//!
//! Mesh loading is the only fallible step of the viewer. Everything that can go wrong while
//! reading a raw mesh from disk is described by [`MeshError`]; once a mesh is loaded, per-frame
//! work is infallible.

use std::io;
use std::path::PathBuf;

/// All the ways loading a triangle mesh can fail.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("mesh file not found at {primary} or {fallback}")]
    NotFound { primary: PathBuf, fallback: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("truncated mesh data: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("{0} unexpected trailing bytes after face list")]
    TrailingData(usize),
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh has no vertices or no faces")]
    Empty,
}

/// Convenience alias used by the mesh loading code.
pub type Result<T> = std::result::Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_both_paths() {
        let e = MeshError::NotFound {
            primary: PathBuf::from("dragon.raw"),
            fallback: PathBuf::from("resources/dragon.raw"),
        };
        let message = e.to_string();
        assert!(message.contains("dragon.raw"));
        assert!(message.contains("resources/dragon.raw"));
    }

    #[test]
    fn index_out_of_range_display() {
        let e = MeshError::IndexOutOfRange {
            face: 3,
            index: 12,
            vertex_count: 10,
        };
        assert_eq!(
            e.to_string(),
            "face 3 references vertex 12, but the mesh has 10 vertices"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        let e = MeshError::Io {
            path: PathBuf::from("mesh.raw"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("denied"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
