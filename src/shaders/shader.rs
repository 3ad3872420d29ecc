use crate::traits::CustomShader;
use anyhow::Context;
use std::{borrow::Cow, fs, path::Path};

pub const PARTICLE_SDR: &str = include_str!("particle.wgsl");
pub const MODEL_SDR: &str = include_str!("model.wgsl");

impl CustomShader for wgpu::Device {
    fn create_shader(&self, shader_str: &str, label: &str) -> wgpu::ShaderModule {
        self.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(shader_str)),
        })
    }

    fn create_shader_from_file(
        &self,
        path: &Path,
        label: &str,
    ) -> anyhow::Result<wgpu::ShaderModule> {
        let shader_str = fs::read_to_string(path)
            .with_context(|| format!("Can't read shader {}", path.display()))?;

        self.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = self.create_shader(&shader_str, label);

        match pollster::block_on(self.pop_error_scope()) {
            Some(err) => anyhow::bail!("Shader {} is invalid: {}", path.display(), err),
            None => Ok(shader),
        }
    }
}

/// Uses the shader at `path` when it compiles, the builtin source otherwise.
pub fn shader_or_builtin(
    device: &wgpu::Device,
    path: Option<&Path>,
    builtin: &str,
    label: &str,
) -> wgpu::ShaderModule {
    match path.map(|path| device.create_shader_from_file(path, label)) {
        Some(Ok(shader)) => shader,
        Some(Err(err)) => {
            log::error!("{:#}, falling back to builtin {} shader", err, label);
            device.create_shader(builtin, label)
        }
        None => device.create_shader(builtin, label),
    }
}
