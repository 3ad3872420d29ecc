use crate::model::ModelVertex;
use anyhow::Context;
use cgmath::{Matrix4, SquareMatrix};
use std::path::Path;

const AMBIENT_STRENGTH: [f32; 3] = [0.1, 0.1, 0.1];

pub struct MaterialData {
    pub diffuse_color: [f32; 3],
    pub ambient_strength: [f32; 3],
    pub specular_strength: [f32; 3],
    pub texture: Option<image::RgbaImage>,
}

/// One drawable piece of an imported model, in model space.
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub material: MaterialData,
    pub transform: Matrix4<f32>,
}

/// Imports every triangle primitive reachable from the scene nodes of a glTF file.
pub fn import_gltf(path: &Path) -> anyhow::Result<Vec<MeshData>> {
    let (document, buffers, images) =
        gltf::import(path).with_context(|| format!("Can't import model {}", path.display()))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("Model has no scene")?;

    let mut meshes = Vec::new();

    for node in scene.nodes() {
        process_node(&node, Matrix4::identity(), &buffers, &images, &mut meshes);
    }

    log::info!("Imported {} meshes from {}", meshes.len(), path.display());

    Ok(meshes)
}

fn process_node(
    node: &gltf::Node,
    parent_transform: Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    meshes: &mut Vec<MeshData>,
) {
    let transform = parent_transform * Matrix4::from(node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("Skipping primitive with mode {:?}", primitive.mode());
                continue;
            }

            if let Some(mesh_data) = process_primitive(&primitive, transform, buffers, images) {
                meshes.push(mesh_data);
            }
        }
    }

    for child in node.children() {
        process_node(&child, transform, buffers, images, meshes);
    }
}

fn process_primitive(
    primitive: &gltf::Primitive,
    transform: Matrix4<f32>,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<[f32; 3]> = match reader.read_positions() {
        Some(positions) => positions.collect(),
        None => {
            log::warn!("Skipping primitive without positions");
            return None;
        }
    };

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|normals| normals.collect())
        .unwrap_or_default();

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|uvs| uvs.into_f32().collect())
        .unwrap_or_default();

    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, position)| ModelVertex {
            position: *position,
            normal: normals.get(i).copied().unwrap_or([0., 0., 0.]),
            uv: uvs.get(i).copied().unwrap_or([0., 0.]),
        })
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    if indices.is_empty() {
        return None;
    }

    Some(MeshData {
        vertices,
        indices,
        material: process_material(&primitive.material(), images),
        transform,
    })
}

fn process_material(material: &gltf::Material, images: &[gltf::image::Data]) -> MaterialData {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();
    let specular = 1. - pbr.roughness_factor();

    let texture = pbr
        .base_color_texture()
        .and_then(|info| images.get(info.texture().source().index()))
        .and_then(to_rgba_image);

    MaterialData {
        diffuse_color: [r, g, b],
        ambient_strength: AMBIENT_STRENGTH,
        specular_strength: [specular; 3],
        texture,
    }
}

pub fn to_rgba_image(data: &gltf::image::Data) -> Option<image::RgbaImage> {
    use gltf::image::Format;

    let pixels = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        format => {
            log::warn!("Unsupported texture format {:?}, using diffuse color", format);
            return None;
        }
    };

    image::RgbaImage::from_raw(data.width, data.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0, "translation": [0.0, 2.0, 0.0] }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }]
    }"#;

    #[test]
    fn imports_triangle_with_node_transform() {
        let mut file = tempfile::Builder::new().suffix(".gltf").tempfile().unwrap();
        file.write_all(TRIANGLE_GLTF.as_bytes()).unwrap();

        let meshes = import_gltf(file.path()).unwrap();

        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[1].position, [1., 0., 0.]);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.transform.w.y, 2.);
        assert_eq!(mesh.material.diffuse_color, [1., 1., 1.]);
        assert!(mesh.material.texture.is_none());
    }

    #[test]
    fn missing_model_is_an_error() {
        assert!(import_gltf(Path::new("does/not/exist.gltf")).is_err());
    }

    #[test]
    fn rgb_texture_gets_alpha() {
        let data = gltf::image::Data {
            pixels: vec![10, 20, 30, 40, 50, 60],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };

        let rgba = to_rgba_image(&data).unwrap();

        assert_eq!(rgba.get_pixel(1, 0).0, [40, 50, 60, 255]);
    }
}
