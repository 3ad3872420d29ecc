use crate::model::GfxState;
use crate::traits::CreateFxView;
use anyhow::Context;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

pub struct DiffuseCtx {
    pub sampler: wgpu::Sampler,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// Joins a texture file name with the directory it lives in.
pub fn texture_path(file_name: &str, directory: impl AsRef<Path>) -> PathBuf {
    directory.as_ref().join(file_name)
}

pub fn load_rgba(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("Can't load texture {}", path.display()))?;

    Ok(image.to_rgba8())
}

impl GfxState {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth texture"),
                size: wgpu::Extent3d {
                    width: config.width.max(1),
                    height: config.height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            })
            .default_view()
    }

    /// Loads the image at `texture_path`. A texture that can't be loaded is logged and
    /// replaced by a single white texel.
    pub fn create_diffuse_context(&self, texture_path: &Path) -> DiffuseCtx {
        let rgba = load_rgba(texture_path).unwrap_or_else(|err| {
            log::error!("{:#}", err);
            white_texel()
        });

        self.create_diffuse_from_rgba(&rgba)
    }

    pub fn create_diffuse_from_rgba(&self, rgba: &image::RgbaImage) -> DiffuseCtx {
        let device = &self.device;
        let dimensions = rgba.dimensions();

        let texture_size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let diffuse_texture = device.create_texture(&wgpu::TextureDescriptor {
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            label: Some("diffuse_texture"),
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &diffuse_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(4 * dimensions.0),
                rows_per_image: NonZeroU32::new(dimensions.1),
            },
            texture_size,
        );

        let view = diffuse_texture.default_view();

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = Self::diffuse_layout(device);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("Diffuse bind group"),
        });

        DiffuseCtx {
            sampler,
            view,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("Diffuse layout"),
        })
    }
}

pub fn white_texel() -> image::RgbaImage {
    image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_path_joins_directory() {
        let path = texture_path("rain.png", "assets/textures");

        assert_eq!(path, Path::new("assets/textures/rain.png"));
    }

    #[test]
    fn missing_texture_is_an_error() {
        let result = load_rgba(Path::new("does/not/exist.png"));

        assert!(result.is_err());
    }

    #[test]
    fn white_texel_is_opaque() {
        let texel = white_texel();

        assert_eq!(texel.dimensions(), (1, 1));
        assert_eq!(texel.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
