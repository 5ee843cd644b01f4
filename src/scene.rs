//! # Scene
//!
//! The GPU resource bundle of the viewer: every buffer, bind group and render pipeline needed to
//! draw the animated mesh, created once when the window is ready and dropped once on shutdown.
//!
//! ## Frame contract
//!
//! Each frame the renderer calls, in order:
//!
//! 1. [`Scene::upload`] writes the full position, normal and face arrays of the
//!    [`MeshStore`]. There are no partial updates.
//! 2. [`Scene::update`] writes the camera and material uniforms from the current
//!    [`RenderParams`]. Nothing is cached between frames.
//! 3. [`Scene::render`] records the draws into the render pass:
//!    - the triangle mesh (flat or Phong) when the mesh is visible,
//!    - the wireframe overlay on top of it when both mesh and wireframe are enabled,
//!    - one sphere impostor per vertex when points are visible.
//!
//! The filled mesh is pushed back with a small depth bias so the wireframe lines, drawn with a
//! `LessEqual` depth test, win against the triangles they outline.

use crate::camera::Camera;
use crate::mesh;
use crate::params::RenderParams;
use crate::renderer::Renderer;
use crate::store::MeshStore;
use crate::uniform_binding::UniformBinding;
use crate::uniform_buffer::{CameraUniform, MaterialUniform};
use crate::vertex::VertexLayout;
use crate::{MESH_SHADER_SOURCE, SPHERE_SHADER_SOURCE};

/// Corners of the quad drawn for every sphere impostor (two triangles).
const SPHERE_QUAD_VERTICES: u32 = 6;

/// GPU resources for drawing one animated triangle mesh.
///
/// Buffer sizes are fixed at creation from the [`MeshStore`]; the vertex count never changes
/// while the viewer runs, only the contents do.
///
/// # Fields
///
/// - position and normal buffers: one `vec3<f32>` per vertex, rewritten every frame.
/// - index buffer: the face list, three `u32` per triangle.
/// - edge buffer: two `u32` per unique undirected edge, for the wireframe line list.
/// - one camera uniform shared by all draws, and one material uniform per draw.
/// - one pipeline per draw kind.
pub struct Scene {
    /// Animated vertex positions, also the per-instance sphere centers.
    pub position_buffer: wgpu::Buffer,

    /// Animated vertex normals.
    pub normal_buffer: wgpu::Buffer,

    /// Triangle indices of the filled mesh.
    pub index_buffer: wgpu::Buffer,

    /// Line indices of the wireframe, built once from the face list.
    pub edge_buffer: wgpu::Buffer,

    /// Number of vertices; also the sphere instance count.
    vertex_count: u32,

    index_count: u32,

    edge_index_count: u32,

    /// Modelview, projection and normal matrix, bound at group 0 for every draw.
    pub camera: UniformBinding<CameraUniform>,

    /// Color, shininess and shading mode of the filled mesh.
    pub mesh_material: UniformBinding<MaterialUniform>,

    /// Color of the wireframe lines.
    pub wireframe_material: UniformBinding<MaterialUniform>,

    /// Color, shininess and radius of the vertex spheres.
    pub point_material: UniformBinding<MaterialUniform>,

    /// Filled triangles, depth biased back so the wireframe stays visible.
    pub mesh_pipeline: wgpu::RenderPipeline,

    /// Edge line list drawn over the mesh.
    pub wireframe_pipeline: wgpu::RenderPipeline,

    /// Instanced sphere impostor quads.
    pub sphere_pipeline: wgpu::RenderPipeline,
}

impl Scene {
    /// Creates the buffers, uniforms and pipelines for the mesh held by `store`.
    ///
    /// `surface_format` is the color target of every pipeline; depth uses
    /// [`Renderer::DEPTH_FORMAT`].
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        store: &MeshStore,
    ) -> Self {
        let vertex_bytes = store.vertex_count() as wgpu::BufferAddress * VertexLayout::STRIDE;

        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Position Buffer"),
            size: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let normal_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Normal Buffer"),
            size: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(store.faces()),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            },
        );

        // Faces never change, so the edge list is built once.
        let edges = mesh::unique_edges(store.faces());
        let edge_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Edge Buffer"),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let camera_layout = UniformBinding::<CameraUniform>::layout(device, "camera_bind_group_layout");
        let material_layout =
            UniformBinding::<MaterialUniform>::layout(device, "material_bind_group_layout");

        let camera = UniformBinding::new(device, &camera_layout, "Camera Uniform");
        let mesh_material = UniformBinding::new(device, &material_layout, "Mesh Material");
        let wireframe_material = UniformBinding::new(device, &material_layout, "Wireframe Material");
        let point_material = UniformBinding::new(device, &material_layout, "Point Material");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &material_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(MESH_SHADER_SOURCE)),
        });

        let sphere_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sphere Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(SPHERE_SHADER_SOURCE)),
        });

        let mesh_pipeline = Self::create_pipeline(
            device,
            surface_format,
            &pipeline_layout,
            PipelineDesc {
                label: "Mesh Pipeline",
                module: &mesh_shader,
                vertex_entry: "vertex_main",
                fragment_entry: "fragment_main",
                buffers: &[VertexLayout::positions(), VertexLayout::normals()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 1.0,
                    clamp: 0.0,
                },
            },
        );

        let wireframe_pipeline = Self::create_pipeline(
            device,
            surface_format,
            &pipeline_layout,
            PipelineDesc {
                label: "Wireframe Pipeline",
                module: &mesh_shader,
                vertex_entry: "wireframe_vertex",
                fragment_entry: "wireframe_fragment",
                buffers: &[VertexLayout::positions()],
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                bias: wgpu::DepthBiasState::default(),
            },
        );

        let sphere_pipeline = Self::create_pipeline(
            device,
            surface_format,
            &pipeline_layout,
            PipelineDesc {
                label: "Sphere Pipeline",
                module: &sphere_shader,
                vertex_entry: "vertex_main",
                fragment_entry: "fragment_main",
                buffers: &[VertexLayout::sphere_centers()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                bias: wgpu::DepthBiasState::default(),
            },
        );

        Self {
            position_buffer,
            normal_buffer,
            index_buffer,
            edge_buffer,
            vertex_count: store.vertex_count() as u32,
            index_count: 3 * store.face_count() as u32,
            edge_index_count: 2 * edges.len() as u32,
            camera,
            mesh_material,
            wireframe_material,
            point_material,
            mesh_pipeline,
            wireframe_pipeline,
            sphere_pipeline,
        }
    }

    /// Writes the complete animated mesh to the GPU.
    pub fn upload(&self, queue: &wgpu::Queue, store: &MeshStore) {
        queue.write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(store.vertices()));
        queue.write_buffer(&self.normal_buffer, 0, bytemuck::cast_slice(store.normals()));
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(store.faces()));
    }

    /// Writes this frame's camera and material uniforms.
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera, params: &RenderParams) {
        self.camera
            .update_buffer(queue, CameraUniform::from_camera(camera));
        self.mesh_material.update_buffer(
            queue,
            MaterialUniform::mesh(&params.mesh_material, params.shading),
        );
        self.wireframe_material
            .update_buffer(queue, MaterialUniform::wireframe(params.wireframe_color));
        self.point_material.update_buffer(
            queue,
            MaterialUniform::spheres(&params.point_material, params.point_radius),
        );
    }

    /// Records the enabled draws into `renderpass`.
    ///
    /// The wireframe is only drawn while the mesh is shown. Spheres are drawn as
    /// six vertices per instance, one instance per mesh vertex.
    pub fn render<'rpass>(&'rpass self, renderpass: &mut wgpu::RenderPass<'rpass>, params: &RenderParams) {
        if self.vertex_count == 0 {
            return;
        }

        renderpass.set_bind_group(0, &self.camera.bind_group, &[]);

        if params.show_mesh {
            renderpass.set_pipeline(&self.mesh_pipeline);
            renderpass.set_bind_group(1, &self.mesh_material.bind_group, &[]);
            renderpass.set_vertex_buffer(0, self.position_buffer.slice(..));
            renderpass.set_vertex_buffer(1, self.normal_buffer.slice(..));
            renderpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            renderpass.draw_indexed(0..self.index_count, 0, 0..1);

            if params.show_wireframe {
                renderpass.set_pipeline(&self.wireframe_pipeline);
                renderpass.set_bind_group(1, &self.wireframe_material.bind_group, &[]);
                renderpass.set_vertex_buffer(0, self.position_buffer.slice(..));
                renderpass.set_index_buffer(self.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
                renderpass.draw_indexed(0..self.edge_index_count, 0, 0..1);
            }
        }

        if params.show_points {
            renderpass.set_pipeline(&self.sphere_pipeline);
            renderpass.set_bind_group(1, &self.point_material.bind_group, &[]);
            renderpass.set_vertex_buffer(0, self.position_buffer.slice(..));
            renderpass.draw(0..SPHERE_QUAD_VERTICES, 0..self.vertex_count);
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        layout: &wgpu::PipelineLayout,
        desc: PipelineDesc<'_>,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: desc.module,
                entry_point: Some(desc.vertex_entry),
                buffers: desc.buffers,
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // Shaded two-sided, the deformed mesh may show its back.
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Renderer::DEPTH_FORMAT,
                depth_write_enabled: desc.depth_write_enabled,
                depth_compare: desc.depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: desc.bias,
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: desc.module,
                entry_point: Some(desc.fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }
}

/// The parts that differ between the scene's render pipelines.
struct PipelineDesc<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    vertex_entry: &'a str,
    fragment_entry: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    depth_write_enabled: bool,
    depth_compare: wgpu::CompareFunction,
    bias: wgpu::DepthBiasState,
}
