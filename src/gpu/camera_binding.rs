use wgpu::util::DeviceExt;

use crate::camera::core::CameraUniform;

/// Uniform buffer and bind group exposing [`CameraUniform`] to shaders at
/// binding 0.
///
/// The viewer itself only clears the canvas; pipelines that draw the scene
/// model build their layout from [`layout`](Self::layout) and set
/// [`bind_group`](Self::bind_group) at group 0.
#[derive(Debug)]
pub struct CameraBinding {
    /// Last uniform written to the GPU.
    pub uniform: CameraUniform,
    /// The uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Layout for pipelines that read the camera.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`buffer`](Self::buffer).
    pub bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    /// Allocate the buffer with an initial uniform.
    #[must_use]
    pub fn new(device: &wgpu::Device, uniform: CameraUniform) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[Self::layout_entry()],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// The single layout entry: the camera uniform at binding 0, visible to
    /// vertex and fragment stages.
    #[must_use]
    pub fn layout_entry() -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    size_of::<CameraUniform>() as u64,
                ),
            },
            count: None,
        }
    }

    /// Upload `uniform` if it differs from what the GPU already has.
    pub fn write(&mut self, queue: &wgpu::Queue, uniform: CameraUniform) -> bool {
        if uniform == self.uniform {
            return false;
        }
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
        true
    }
}
