use std::path::Path;

pub trait CustomShader {
    fn create_shader(&self, shader_str: &str, label: &str) -> wgpu::ShaderModule;

    /// Reads and validates a WGSL file holding both stages.
    fn create_shader_from_file(&self, path: &Path, label: &str)
        -> anyhow::Result<wgpu::ShaderModule>;
}

pub trait ToVecF32 {
    fn to_vec_f32(&self) -> Vec<f32>;
}

pub trait CreateAspect {
    fn aspect(&self) -> f32;
}

impl CreateAspect for wgpu::SurfaceConfiguration {
    fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

pub trait CreateFxView {
    fn default_view(&self) -> wgpu::TextureView;
}

impl CreateFxView for wgpu::Texture {
    fn default_view(&self) -> wgpu::TextureView {
        self.create_view(&wgpu::TextureViewDescriptor::default())
    }
}
