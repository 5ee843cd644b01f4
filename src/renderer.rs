//! # Renderer
//!
//! Ties together the [`Gpu`], the depth buffer, the `egui` renderer and the [`Scene`] bundle, and
//! records one frame at a time:
//!
//! 1. Upload the animated mesh and the per-frame uniforms.
//! 2. Sync `egui` textures and buffers.
//! 3. Clear to white, draw the scene, then draw the GUI on top in the same pass.
//! 4. Submit and present.
//!
//! A lost or outdated surface is reconfigured and the frame is skipped.

use crate::gpu::Gpu;
use crate::scene::Scene;
use crate::simulation::Simulation;
use crate::store::MeshStore;

/// Everything needed to draw a frame into the window.
///
/// Dropping the renderer releases all GPU resources of the viewer; the app does this exactly
/// once, on shutdown.
pub struct Renderer {
    /// Surface, device and queue of the window.
    gpu: Gpu,

    /// Depth attachment, recreated on every non-empty resize.
    depth_texture_view: wgpu::TextureView,

    /// Draws the `egui` control panel on top of the scene.
    egui_renderer: egui_wgpu::Renderer,

    /// Mesh, wireframe and sphere resources.
    scene: Scene,
}

impl Renderer {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = crate::gpu::DEPTH_FORMAT;

    /// Sets up the GPU for `window` and creates the scene for the mesh in `store`.
    ///
    /// `store` only sizes the buffers and provides the face list; vertex data is uploaded with
    /// every frame.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        store: &MeshStore,
    ) -> Self {
        let gpu = Gpu::new_async(window, width, height).await;

        let depth_texture_view =
            gpu.create_depth_texture(gpu.surface_config.width, gpu.surface_config.height);

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            Some(Self::DEPTH_FORMAT),
            1,
            false,
        );

        let scene = Scene::new(&gpu.device, gpu.surface_format, store);

        Self {
            gpu,
            depth_texture_view,
            egui_renderer,
            scene,
        }
    }

    /// Resizes the surface and depth buffer. Zero sizes (a minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        self.depth_texture_view = self.gpu.create_depth_texture(width, height);
    }

    /// Uploads the current simulation state, draws the scene and the GUI, and presents.
    ///
    /// Skips the frame when no surface texture can be acquired; lost or outdated surfaces are
    /// reconfigured first so the next frame succeeds.
    pub fn render_frame(
        &mut self,
        screen_descriptor: egui_wgpu::ScreenDescriptor,
        paint_jobs: Vec<egui::epaint::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        simulation: &Simulation,
    ) {
        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {error}, reconfiguring");
                self.gpu.configure();
                return;
            }
            Err(error) => {
                log::error!("Failed to get surface texture: {error}");
                return;
            }
        };

        self.scene.upload(&self.gpu.queue, &simulation.store);
        self.scene
            .update(&self.gpu.queue, &simulation.camera, &simulation.params);

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    label: wgpu::Label::default(),
                    aspect: wgpu::TextureAspect::default(),
                    format: Some(self.gpu.surface_format),
                    dimension: None,
                    base_mip_level: 0,
                    mip_level_count: None,
                    base_array_layer: 0,
                    array_layer_count: None,
                    usage: None,
                });

        encoder.insert_debug_marker("Render scene");

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene.render(&mut render_pass, &simulation.params);

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
