use super::{CameraCtx, GfxState};
use crate::loader::{self, MeshData};
use crate::shaders::shader::{shader_or_builtin, MODEL_SDR};
use crate::texture::{white_texel, DiffuseCtx};
use crate::traits::ToVecF32;
use crate::util::UniformContext;
use bytemuck::{Pod, Zeroable};
use cgmath::Vector3;
use std::ops::Range;
use std::path::Path;
use wgpu::util::DeviceExt;

#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl ModelVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    index_count: u32,
    material: UniformContext,
    diffuse_ctx: DiffuseCtx,
}

impl Mesh {
    /// Model matrix followed by diffuse color, ambient and specular strength.
    const MATERIAL_FLOAT_COUNT: usize = 16 + 4 + 4 + 4;

    pub fn indices_range(&self) -> Range<u32> {
        0..self.index_count
    }

    fn material_content(data: &MeshData) -> Vec<f32> {
        let transform: &[f32; 16] = data.transform.as_ref();
        let material = &data.material;

        [
            transform.to_vec(),
            Vector3::from(material.diffuse_color).to_vec_f32(),
            Vector3::from(material.ambient_strength).to_vec_f32(),
            Vector3::from(material.specular_strength).to_vec_f32(),
        ]
        .concat()
    }
}

/// Imported meshes plus the lit pipeline they are drawn with.
pub struct Model {
    pub meshes: Vec<Mesh>,
    render_pipeline: wgpu::RenderPipeline,
}

impl Model {
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, camera_ctx: &'a CameraCtx) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(1, camera_ctx.bind_group(), &[]);

        for mesh in self.meshes.iter() {
            render_pass.set_bind_group(0, &mesh.diffuse_ctx.bind_group, &[]);
            render_pass.set_bind_group(2, &mesh.material.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(mesh.indices_range(), 0, 0..1);
        }
    }
}

impl GfxState {
    /// Imports the model at `path`. A model that fails to import is logged and skipped.
    pub fn load_model(&self, path: &Path, camera_ctx: &CameraCtx) -> Option<Model> {
        match loader::import_gltf(path) {
            Ok(data) => Some(self.create_model(&data, camera_ctx)),
            Err(err) => {
                log::error!("{:#}", err);
                None
            }
        }
    }

    pub fn create_model(&self, data: &[MeshData], camera_ctx: &CameraCtx) -> Model {
        let device = &self.device;

        let meshes: Vec<Mesh> = data
            .iter()
            .map(|mesh_data| {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Model vertex buffer"),
                    contents: bytemuck::cast_slice(&mesh_data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Model index buffer"),
                    contents: bytemuck::cast_slice(&mesh_data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

                let material = UniformContext::new(device, Mesh::MATERIAL_FLOAT_COUNT, "Material");
                material.write(&self.queue, &Mesh::material_content(mesh_data));

                let diffuse_ctx = match &mesh_data.material.texture {
                    Some(texture) => self.create_diffuse_from_rgba(texture),
                    None => self.create_diffuse_from_rgba(&white_texel()),
                };

                Mesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh_data.indices.len() as u32,
                    material,
                    diffuse_ctx,
                }
            })
            .collect();

        let shader = shader_or_builtin(device, None, MODEL_SDR, "Model render");
        let diffuse_layout = GfxState::diffuse_layout(device);
        let material_layout =
            UniformContext::create_layout(device, Mesh::MATERIAL_FLOAT_COUNT, "Material");

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Model render layout"),
            bind_group_layouts: &[
                &diffuse_layout,
                camera_ctx.bind_group_layout(),
                &material_layout,
            ],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Model render pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[ModelVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: GfxState::DEPTH_FORMAT,
                depth_write_enabled: true,
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

        Model {
            meshes,
            render_pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MaterialData;
    use cgmath::{Matrix4, SquareMatrix};

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ModelVertex>(), 8 * 4);
        assert_eq!(ModelVertex::desc().attributes.len(), 3);
    }

    #[test]
    fn material_content_fills_uniform() {
        let data = MeshData {
            vertices: vec![],
            indices: vec![],
            material: MaterialData {
                diffuse_color: [1., 0.5, 0.25],
                ambient_strength: [0.1; 3],
                specular_strength: [0.; 3],
                texture: None,
            },
            transform: Matrix4::identity(),
        };

        let content = Mesh::material_content(&data);

        assert_eq!(content.len(), Mesh::MATERIAL_FLOAT_COUNT);
        assert_eq!(&content[16..20], &[1., 0.5, 0.25, 0.]);
    }
}
