//! # Render Parameters
//!
//! Presentation settings edited through the GUI and keyboard and read fresh by the renderer on
//! every frame.

/// How the triangle mesh is lit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shading {
    /// One normal per face.
    #[default]
    Flat,
    /// Interpolated vertex normals.
    Phong,
}

impl Shading {
    pub const ALL: [Shading; 2] = [Shading::Flat, Shading::Phong];

    pub fn next(self) -> Self {
        match self {
            Shading::Flat => Shading::Phong,
            Shading::Phong => Shading::Flat,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shading::Flat => "Flat",
            Shading::Phong => "Phong",
        }
    }
}

/// Diffuse color plus Blinn-Phong exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub shininess: f32,
}

impl Material {
    pub const SHININESS_RANGE: std::ops::RangeInclusive<f32> = 1e-12..=1000.0;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub show_mesh: bool,
    pub shading: Shading,
    pub mesh_material: Material,
    pub show_wireframe: bool,
    pub wireframe_color: [f32; 3],
    pub show_points: bool,
    pub point_radius: f32,
    pub point_material: Material,
}

impl RenderParams {
    pub const POINT_RADIUS_RANGE: std::ops::RangeInclusive<f32> = 0.0..=0.1;
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            show_mesh: true,
            shading: Shading::Flat,
            mesh_material: Material {
                color: [0.0, 0.25, 1.0],
                shininess: 8.0,
            },
            show_wireframe: false,
            wireframe_color: [0.0, 0.0, 0.0],
            show_points: false,
            point_radius: 0.0014,
            point_material: Material {
                color: [1.0, 1.0, 1.0],
                shininess: 8.0,
            },
        }
    }
}
