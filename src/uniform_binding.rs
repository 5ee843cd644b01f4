//! # Uniform Binding
//!
//! Pairs a uniform buffer with the bind group that exposes it to shaders as
//! `@binding(0)` of some bind group. The layout is created separately with
//! [`UniformBinding::layout`] so several bindings of the same uniform type can share it and be
//! used interchangeably with one pipeline layout.

use std::marker::PhantomData;

pub struct UniformBinding<T> {
    pub buffer: wgpu::Buffer,

    pub bind_group: wgpu::BindGroup,

    _uniform: PhantomData<T>,
}

impl<T: bytemuck::Pod + Default> UniformBinding<T> {
    /// Layout of a bind group holding a single `T` uniform at binding 0.
    pub fn layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
                },
                count: None,
            }],
            label: Some(label),
        })
    }

    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&[T::default()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });

        Self {
            buffer,
            bind_group,
            _uniform: PhantomData,
        }
    }

    /// Replaces the buffer contents; takes effect with the next queue submission.
    pub fn update_buffer(&self, queue: &wgpu::Queue, uniform: T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]))
    }
}
