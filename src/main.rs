use drizzle::init::{AppSettings, GeneratorSettings};
use std::path::PathBuf;

const TEXTURE_DIR: &str = "assets/textures";

struct Demo;

impl AppSettings for Demo {
    fn rain(&self) -> GeneratorSettings {
        GeneratorSettings {
            texture_file: "rain.png".to_string(),
            texture_directory: PathBuf::from(TEXTURE_DIR),
            capacity: 10_000,
            spawn_per_frame: 100,
            shader_path: None,
        }
    }

    fn smoke(&self) -> GeneratorSettings {
        GeneratorSettings {
            texture_file: "smoke.png".to_string(),
            texture_directory: PathBuf::from(TEXTURE_DIR),
            capacity: 2_000,
            spawn_per_frame: 10,
            shader_path: None,
        }
    }

    fn model_path(&self) -> Option<PathBuf> {
        Some(PathBuf::from("assets/models/scene.gltf"))
    }
}

fn main() -> anyhow::Result<()> {
    drizzle::start(Demo)
}
