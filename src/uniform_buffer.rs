//! # Uniform Buffers
//!
//! CPU-side mirrors of the uniform blocks declared in `shaders/common.wgsl`. Each struct is
//! `#[repr(C)]` and `bytemuck::Pod` so it can be written to a `wgpu::Buffer` as raw bytes, and is
//! padded to the WGSL uniform layout rules (16-byte aligned `vec3`, struct size a multiple of 16).
//!
//! - [`CameraUniform`]: modelview, projection and normal matrices, shared by every pipeline.
//! - [`MaterialUniform`]: color, shininess and per-draw switches. The mesh, the wireframe and the
//!   sphere impostors each own one, because all uniform writes of a frame land before the frame's
//!   commands execute.

use nalgebra_glm as glm;

use crate::camera::Camera;
use crate::params::{Material, Shading};

/// Camera transforms for the vertex stage.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub modelview: glm::Mat4,
    pub projection: glm::Mat4,
    /// Inverse transpose of `modelview`, for transforming normals.
    pub normal_matrix: glm::Mat4,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            modelview: *camera.modelview(),
            projection: *camera.projection(),
            normal_matrix: glm::inverse_transpose(*camera.modelview()),
        }
    }
}

/// Surface appearance of one draw call.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 3],
    pub shininess: f32,
    /// Non-zero selects interpolated vertex normals, zero selects face normals.
    pub smooth_shading: u32,
    /// Sphere impostor radius in world units.
    pub radius: f32,
    pub _padding: [u32; 2],
}

impl MaterialUniform {
    pub fn mesh(material: &Material, shading: Shading) -> Self {
        Self {
            color: material.color,
            shininess: material.shininess,
            smooth_shading: u32::from(shading == Shading::Phong),
            ..Self::default()
        }
    }

    pub fn wireframe(color: [f32; 3]) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn spheres(material: &Material, radius: f32) -> Self {
        Self {
            color: material.color,
            shininess: material.shininess,
            smooth_shading: 1,
            radius,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 192);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 32);
    }

    #[test]
    fn mesh_material_encodes_shading() {
        let material = Material {
            color: [0.0, 0.25, 1.0],
            shininess: 8.0,
        };
        assert_eq!(MaterialUniform::mesh(&material, Shading::Flat).smooth_shading, 0);
        assert_eq!(MaterialUniform::mesh(&material, Shading::Phong).smooth_shading, 1);
    }

    #[test]
    fn normal_matrix_of_rigid_view_is_the_view_rotation() {
        let mut camera = Camera::default();
        camera.translate(glm::vec3(0.0, 0.0, -2.0));
        let uniform = CameraUniform::from_camera(&camera);

        let n = uniform.normal_matrix * glm::vec4(0.0, 1.0, 0.0, 0.0);
        approx::assert_relative_eq!(n.y, 1.0, epsilon = 1e-6);
    }
}
