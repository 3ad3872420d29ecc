use super::{
    Camera, CameraCtx, Clock, Color, CreateGeneratorOptions, GfxState, Model, RainGenerator,
    SmokeGenerator,
};
use crate::init::AppSettings;
use cgmath::{EuclideanSpace, Vector3, Zero};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyboardInput, MouseButton, MouseScrollDelta};
use winit::window::Window;

/// Pixels of a touchpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 20.;

pub struct State {
    pub camera: Camera,
    pub camera_ctx: CameraCtx,
    pub clock: Clock,
    pub rain: RainGenerator,
    pub smoke: SmokeGenerator,
    pub model: Option<Model>,
    pub clear_color: Color,
    pub gfx_state: GfxState,
    rain_spawn_count: u32,
    smoke_spawn_count: u32,
    mouse_pressed: bool,
}

impl State {
    pub fn new(app_settings: impl AppSettings, window: Window) -> anyhow::Result<Self> {
        let rain_settings = app_settings.rain();
        let smoke_settings = app_settings.smoke();
        let rain_capacity = rain_settings.validate()?;
        let smoke_capacity = smoke_settings.validate()?;

        let gfx_state = pollster::block_on(GfxState::new(window))?;

        let camera = Camera::new(app_settings.camera_position(), gfx_state.aspect());
        let camera_ctx = CameraCtx::new(&gfx_state.device);
        let seed = app_settings.seed();

        let rain = gfx_state.create_generator(CreateGeneratorOptions {
            behaviour: app_settings.rain_behaviour(),
            capacity: rain_capacity,
            texture_path: &rain_settings.texture_path(),
            shader_path: rain_settings.shader_path.as_deref(),
            seed,
            camera_ctx: &camera_ctx,
        });

        let smoke = gfx_state.create_generator(CreateGeneratorOptions {
            behaviour: app_settings.smoke_behaviour(),
            capacity: smoke_capacity,
            texture_path: &smoke_settings.texture_path(),
            shader_path: smoke_settings.shader_path.as_deref(),
            seed: seed.map(|seed| seed.wrapping_add(1)),
            camera_ctx: &camera_ctx,
        });

        let model = app_settings
            .model_path()
            .and_then(|path| gfx_state.load_model(&path, &camera_ctx));

        Ok(Self {
            camera,
            camera_ctx,
            clock: Clock::new(),
            rain,
            smoke,
            model,
            clear_color: app_settings.clear_color(),
            gfx_state,
            rain_spawn_count: rain_settings.spawn_per_frame,
            smoke_spawn_count: smoke_settings.spawn_per_frame,
            mouse_pressed: false,
        })
    }

    pub fn update(&mut self) {
        self.clock.update();
        let delta_sec = self.clock.delta_sec();

        self.camera.update(delta_sec);
        self.camera_ctx.update(&self.gfx_state.queue, &self.camera);

        let camera_position = self.camera.position;

        // Rain falls around the viewer, smoke rises from its fixed emission point
        self.rain.update(
            delta_sec,
            self.rain_spawn_count,
            camera_position,
            camera_position.to_vec(),
        );
        self.smoke.update(
            delta_sec,
            self.smoke_spawn_count,
            camera_position,
            Vector3::zero(),
        );
    }

    pub fn render(&mut self) {
        GfxState::render(self);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gfx_state.resize(size);
        self.camera.resize(self.gfx_state.aspect());
    }

    pub fn process_events(&mut self, input: KeyboardInput) {
        self.camera.process_input(&input);
    }

    pub fn process_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.mouse_pressed = state == ElementState::Pressed;
        }
    }

    /// Looks around while the left button is held.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.mouse_pressed {
            // Screen y grows downwards, pitch grows upwards
            self.camera
                .process_mouse_movement(delta.0 as f32, -delta.1 as f32, true);
        }
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let y_offset = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
        };

        self.camera.process_mouse_scroll(y_offset);
    }
}
