//! # Vertex Layouts
//!
//! The viewer keeps positions and normals in two separate arrays (see [`MeshStore`]) and uploads
//! each of them to its own GPU buffer. This module describes how the GPU should read those
//! buffers.
//!
//! | Buffer    | Shader location | Format      | Step mode  | Used by                  |
//! |-----------|-----------------|-------------|------------|--------------------------|
//! | positions | 0               | `Float32x3` | `Vertex`   | mesh, wireframe          |
//! | normals   | 1               | `Float32x3` | `Vertex`   | mesh                     |
//! | positions | 0               | `Float32x3` | `Instance` | sphere impostors         |
//!
//! The position buffer is bound twice: once per vertex for the triangle mesh and the wireframe,
//! and once per instance for the sphere impostors, where every vertex becomes one camera-facing
//! quad.
//!
//! Both arrays are `nalgebra_glm::Vec3`, a tightly packed `#[repr(C)]` triple of `f32`, so the
//! stride is 12 bytes and the slices can be cast to bytes with `bytemuck` directly.
//!
//! [`MeshStore`]: crate::store::MeshStore

use nalgebra_glm as glm;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

/// Namespace for the vertex buffer layouts shared by the render pipelines.
pub struct VertexLayout;

impl VertexLayout {
    /// Size of one position or normal in bytes.
    pub const STRIDE: wgpu::BufferAddress = std::mem::size_of::<glm::Vec3>() as wgpu::BufferAddress;

    /// Per-vertex positions at shader location 0.
    pub fn positions() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRIBUTES,
        }
    }

    /// Per-vertex normals at shader location 1.
    pub fn normals() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &NORMAL_ATTRIBUTES,
        }
    }

    /// Positions read once per instance, used as sphere centers.
    pub fn sphere_centers() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_tightly_packed() {
        assert_eq!(VertexLayout::STRIDE, 12);
        let vertices = [glm::vec3(1.0_f32, 2.0, 3.0), glm::vec3(4.0, 5.0, 6.0)];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn layouts_use_distinct_locations() {
        assert_eq!(VertexLayout::positions().attributes[0].shader_location, 0);
        assert_eq!(VertexLayout::normals().attributes[0].shader_location, 1);
        assert_eq!(
            VertexLayout::sphere_centers().step_mode,
            wgpu::VertexStepMode::Instance
        );
    }
}
