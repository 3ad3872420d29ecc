use crate::behaviours::{Rain, Smoke};
use crate::model::Color;
use crate::texture;
use anyhow::Context;
use cgmath::Point3;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Construction parameters of one particle generator.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub texture_file: String,
    pub texture_directory: PathBuf,
    pub capacity: usize,
    pub spawn_per_frame: u32,
    /// WGSL file replacing the builtin particle shader.
    pub shader_path: Option<PathBuf>,
}

impl GeneratorSettings {
    pub fn validate(&self) -> anyhow::Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).with_context(|| {
            format!(
                "Generator using {} needs a capacity above zero",
                self.texture_file
            )
        })
    }

    pub fn texture_path(&self) -> PathBuf {
        texture::texture_path(&self.texture_file, &self.texture_directory)
    }
}

#[allow(unused)]
pub trait AppSettings {
    fn rain(&self) -> GeneratorSettings;
    fn smoke(&self) -> GeneratorSettings;

    fn title(&self) -> String {
        "Drizzle".to_string()
    }

    fn clear_color(&self) -> Color {
        Color::rgba(26, 26, 38, 255)
    }

    fn camera_position(&self) -> Point3<f32> {
        Point3::new(0., 0., 3.)
    }

    /// Override to tweak how rain falls and where it collides
    fn rain_behaviour(&self) -> Rain {
        Rain::default()
    }

    fn smoke_behaviour(&self) -> Smoke {
        Smoke::default()
    }

    /// glTF model drawn behind the particles
    fn model_path(&self) -> Option<PathBuf> {
        None
    }

    /// Makes both generators deterministic, rain uses the seed and smoke the next one
    fn seed(&self) -> Option<u64> {
        None
    }
}
