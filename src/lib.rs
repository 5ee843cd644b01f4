//! # Wave Mesh Viewer Library
//!
//! This library animates a travelling wave over a triangle mesh and renders the result with
//! `wgpu`, with an `egui` control panel on top. The mesh is loaded once; every simulation tick
//! displaces each vertex along its rest-pose normal and recomputes the vertex normals, and every
//! frame uploads the whole animated mesh to the GPU.
//!
//! ## Modules
//!
//! - [`app`]: `winit` event loop driver: window, input, fixed-period ticks, frame loop.
//! - [`simulation`]: the state handed to every entry point (mesh store, clock, parameters, camera).
//! - [`wave`]: the closed-form displacement kernel.
//! - [`store`]: rest pose and animated copy of the mesh.
//! - [`mesh`]: triangle mesh type, vertex normal recomputation, edge extraction.
//! - [`loader`]: raw binary mesh reader with resource directory fallback.
//! - [`clock`]: simulation clock and fixed timestep accumulator.
//! - [`camera`] and [`trackball`]: mouse driven perspective camera.
//! - [`params`] and [`controls`]: render parameters and key bindings.
//! - [`gui`]: the `egui` control panel.
//! - [`renderer`], [`gpu`], [`scene`]: GPU setup and per-frame drawing.
//! - [`vertex`], [`uniform_buffer`], [`uniform_binding`]: GPU data layouts.
//! - [`config`]: command line options.
//! - [`error`]: mesh loading errors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wave_core::{load_triangle_mesh, App, FixedTimestep, MeshStore, Simulation};
//!
//! let store = MeshStore::new(load_triangle_mesh("bunny.raw", "resources/")?)?;
//! let mut app = App::new(
//!     Simulation::new(store),
//!     FixedTimestep::new(std::time::Duration::from_millis(15)),
//! );
//! winit::event_loop::EventLoop::new()?.run_app(&mut app)?;
//! ```
//!
//! ## Dependencies
//!
//! - `wgpu`: GPU device, buffers, pipelines.
//! - `winit`: window and event management.
//! - `egui`, `egui-winit`, `egui-wgpu`: the control panel.
//! - `nalgebra-glm`: vectors, matrices and quaternions.
//! - `log` and `env_logger`: logging.
//! - `thiserror`: error types.
//! - `clap`: command line parsing.

pub mod app;
pub mod camera;
pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod gpu;
pub mod gui;
pub mod loader;
pub mod mesh;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod simulation;
pub mod store;
pub mod trackball;
pub mod uniform_binding;
pub mod uniform_buffer;
pub mod vertex;
pub mod wave;

pub use crate::app::App;
pub use crate::camera::Camera;
pub use crate::clock::{FixedTimestep, SimulationClock};
pub use crate::config::Config;
pub use crate::error::MeshError;
pub use crate::loader::load_triangle_mesh;
pub use crate::mesh::TriangleMesh;
pub use crate::params::{RenderParams, Shading};
pub use crate::renderer::Renderer;
pub use crate::simulation::Simulation;
pub use crate::store::MeshStore;

/// WGSL source of the triangle mesh and wireframe pipelines.
///
/// Entry points: `vertex_main`/`fragment_main` for the shaded mesh (positions at location 0,
/// normals at location 1) and `wireframe_vertex`/`wireframe_fragment` for the edge overlay.
/// Group 0 holds the camera uniform, group 1 the material of the current draw.
pub const MESH_SHADER_SOURCE: &str = concat!(
    include_str!("shaders/common.wgsl"),
    include_str!("shaders/mesh.wgsl")
);

/// WGSL source of the sphere impostor pipeline.
///
/// Draws six vertices per instance, one instance per mesh vertex (center at location 0), and
/// writes fragment depth so overlapping spheres intersect correctly.
pub const SPHERE_SHADER_SOURCE: &str = concat!(
    include_str!("shaders/common.wgsl"),
    include_str!("shaders/sphere.wgsl")
);
