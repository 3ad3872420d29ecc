use std::num::NonZeroU64;

/// Uniform buffer with its own bind group, visible to both shader stages.
pub struct UniformContext {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    float_count: usize,
}

impl UniformContext {
    pub fn new(device: &wgpu::Device, float_count: usize, label: &str) -> Self {
        let size = (float_count * std::mem::size_of::<f32>()) as u64;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} uniform buffer", label)),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = Self::create_layout(device, float_count, label);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} uniform bindgroup", label)),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
            float_count,
        }
    }

    pub fn create_layout(
        device: &wgpu::Device,
        float_count: usize,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        let size = (float_count * std::mem::size_of::<f32>()) as u64;

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} uniform layout", label)),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(size),
                },
                count: None,
            }],
        })
    }

    /// Overwrites the uniform, extra floats are ignored.
    pub fn write(&self, queue: &wgpu::Queue, content: &[f32]) {
        let len = content.len().min(self.float_count);

        if len < self.float_count {
            log::warn!(
                "Uniform expects {} floats, got {}",
                self.float_count,
                content.len()
            );
        }

        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&content[..len]));
    }
}
