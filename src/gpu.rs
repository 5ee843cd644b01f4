//! # GPU Management Module
//!
//! The `gpu` module owns the `wgpu` objects tied to the window: the surface, the device and its
//! queue, and the surface configuration. It also creates the depth texture the scene renders
//! into, recreating it whenever the window is resized.
//!
//! ## Surface choices
//!
//! - **Format**: the first non-sRGB format the surface offers. `egui-wgpu` writes gamma-encoded
//!   colors and expects a linear target; the mesh shaders follow the same convention.
//! - **Present mode**: `AutoVsync`, which every surface supports. The simulation clock is
//!   decoupled from the frame rate, so syncing to the display only affects smoothness.
//! - **Alpha**: `Opaque` when available. The viewer clears to an opaque background.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let gpu = pollster::block_on(Gpu::new_async(window, width, height));
//! let depth = gpu.create_depth_texture(width, height);
//! ```

use wgpu::InstanceDescriptor;

/// Format of the depth attachment shared by the scene and `egui` pipelines.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The GPU objects bound to one window surface.
///
/// Created once in [`Gpu::new_async`] after the window exists, resized on every window resize
/// and dropped together with the renderer on shutdown.
pub struct Gpu {
    /// Window surface frames are presented to.
    ///
    /// Must be reconfigured with [`Gpu::configure`] after a resize or when acquiring a frame
    /// reports the surface as lost or outdated.
    pub surface: wgpu::Surface<'static>,

    /// Logical device used to create every buffer, texture and pipeline of the viewer.
    pub device: wgpu::Device,

    /// Queue the per-frame buffer writes and command buffers are submitted to.
    pub queue: wgpu::Queue,

    /// Current surface configuration. Width and height track the window's inner size.
    pub surface_config: wgpu::SurfaceConfiguration,

    /// Color format of the surface textures, also the target format of every color pipeline.
    pub surface_format: wgpu::TextureFormat,
}

impl Gpu {
    /// Resizes the surface to `width` × `height` pixels and reconfigures it.
    ///
    /// Callers skip zero sizes (a minimized window); `wgpu` rejects them.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.configure();
    }

    /// Applies the current surface configuration, e.g. after the surface was lost.
    pub fn configure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Creates a depth attachment matching a `width` × `height` surface.
    pub fn create_depth_texture(&self, width: u32, height: u32) -> wgpu::TextureView {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Acquires an adapter and device compatible with `window` and configures its surface.
    ///
    /// Panics when no surface, adapter or device is available: the viewer cannot do anything
    /// useful without one.
    pub async fn new_async(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Self {
        let instance = wgpu::Instance::new(&InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .expect("Failed to create surface!");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let info = adapter.get_info();
        log::info!("WGPU Adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Wave Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .expect("Failed to request a device!");

        let capabilities = surface.get_capabilities(&adapter);
        let surface_format = preferred_surface_format(&capabilities.formats)
            .expect("Surface reports no supported formats!");
        let alpha_mode = if capabilities
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::Opaque)
        {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            wgpu::CompositeAlphaMode::Auto
        };
        log::debug!("Surface format {surface_format:?}, alpha mode {alpha_mode:?}");

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        Self {
            surface,
            device,
            queue,
            surface_config,
            surface_format,
        }
    }
}

/// First non-sRGB format in `formats`, falling back to the first one offered.
fn preferred_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_linear_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(
            preferred_surface_format(&formats),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            preferred_surface_format(&formats),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(preferred_surface_format(&[]), None);
    }
}
