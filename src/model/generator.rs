use super::{CameraCtx, Emitter, GfxState};
use crate::behaviours::{ParticleBehaviour, Rain, Smoke};
use crate::shaders::shader::{shader_or_builtin, PARTICLE_SDR};
use crate::texture::DiffuseCtx;
use cgmath::{Point3, Vector3};
use std::mem;
use std::num::NonZeroUsize;
use std::path::Path;
use wgpu::util::DeviceExt;

pub type RainGenerator = ParticleGenerator<Rain>;
pub type SmokeGenerator = ParticleGenerator<Smoke>;

/// Corners of the quad every particle is drawn with.
#[rustfmt::skip]
const QUAD_VERTICES: [[f32; 3]; 4] = [
    [-0.5, -0.5, 0.0],
    [ 0.5, -0.5, 0.0],
    [-0.5,  0.5, 0.0],
    [ 0.5,  0.5, 0.0],
];

/// Simulates particles on the CPU and draws the live ones with one instanced draw.
pub struct ParticleGenerator<B: ParticleBehaviour> {
    emitter: Emitter<B>,
    diffuse_ctx: DiffuseCtx,
    render_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
}

pub struct CreateGeneratorOptions<'a, B: ParticleBehaviour> {
    pub behaviour: B,
    pub capacity: NonZeroUsize,
    pub texture_path: &'a Path,
    /// Replaces the builtin particle shader when it compiles.
    pub shader_path: Option<&'a Path>,
    pub seed: Option<u64>,
    pub camera_ctx: &'a CameraCtx,
}

impl<B: ParticleBehaviour> ParticleGenerator<B> {
    pub fn update(
        &mut self,
        delta_sec: f32,
        spawn_count: u32,
        camera_position: Point3<f32>,
        spawn_offset: Vector3<f32>,
    ) {
        self.emitter
            .update(delta_sec, spawn_count, camera_position, spawn_offset);
    }

    /// Uploads the staged particles of the last update and draws them.
    pub fn render<'a>(
        &'a self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_ctx: &'a CameraCtx,
    ) {
        let staging = self.emitter.staging();
        let live_count = staging.live_count() as u32;

        if live_count > 0 {
            queue.write_buffer(
                &self.position_buffer,
                0,
                bytemuck::cast_slice(staging.positions()),
            );
            queue.write_buffer(&self.color_buffer, 0, bytemuck::cast_slice(staging.colors()));
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.diffuse_ctx.bind_group, &[]);
        render_pass.set_bind_group(1, camera_ctx.bind_group(), &[]);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.position_buffer.slice(..));
        render_pass.set_vertex_buffer(2, self.color_buffer.slice(..));
        render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..live_count);
    }

    pub fn emitter(&self) -> &Emitter<B> {
        &self.emitter
    }

    pub fn live_count(&self) -> usize {
        self.emitter.live_count()
    }
}

impl GfxState {
    pub fn create_generator<B: ParticleBehaviour>(
        &self,
        options: CreateGeneratorOptions<B>,
    ) -> ParticleGenerator<B> {
        let device = &self.device;
        let capacity = options.capacity.get() as u64;

        let emitter = Emitter::new(options.behaviour, options.capacity, options.seed);
        let diffuse_ctx = self.create_diffuse_context(options.texture_path);

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle quad buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Filled every frame, only the live part gets written
        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle position buffer"),
            size: capacity * mem::size_of::<[f32; 4]>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let color_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle color buffer"),
            size: capacity * mem::size_of::<[u8; 4]>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = shader_or_builtin(device, options.shader_path, PARTICLE_SDR, "Particle render");

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle render layout"),
            bind_group_layouts: &[
                &diffuse_ctx.bind_group_layout,
                options.camera_ctx.bind_group_layout(),
            ],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle render pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &instance_layouts(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            // Sorted back to front, so test against the scene but don't occlude each other
            depth_stencil: Some(wgpu::DepthStencilState {
                format: GfxState::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        log::debug!("Created particle generator with {} slots", capacity);

        ParticleGenerator {
            emitter,
            diffuse_ctx,
            render_pipeline,
            quad_buffer,
            position_buffer,
            color_buffer,
        }
    }
}

/// Quad corners per vertex, position with size and color per instance.
fn instance_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    const CORNER_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    const POSITION_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];
    const COLOR_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Unorm8x4];

    [
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &CORNER_ATTR,
        },
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION_ATTR,
        },
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<[u8; 4]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR_ATTR,
        },
    ]
}
