use super::State;
use crate::traits::CreateAspect;
use anyhow::Context;
use std::iter;
use winit::dpi::PhysicalSize;
use winit::window;

/**
GfxState is used to pass around to others modules.
See for example generator.rs
*/
pub struct GfxState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub depth_view: wgpu::TextureView,
    window: window::Window,
    surface: wgpu::Surface,
}

impl GfxState {
    pub async fn new(window: window::Window) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = unsafe { instance.create_surface(&window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable graphics adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::default(),
                    limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .context("Can't create graphics device")?;

        device.on_uncaptured_error(|err| log::error!("Graphics error: {}", err));

        let size = window.inner_size();
        let format = *surface
            .get_supported_formats(&adapter)
            .first()
            .context("Surface is incompatible with the adapter")?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
        };

        surface.configure(&device, &surface_config);

        log::info!("Using adapter {:?}", adapter.get_info());

        let depth_view = Self::create_depth_view(&device, &surface_config);

        Ok(Self {
            surface,
            window,
            device,
            surface_config,
            queue,
            depth_view,
        })
    }

    pub fn window_id(&self) -> window::WindowId {
        self.window.id()
    }

    pub fn window(&self) -> &window::Window {
        &self.window
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn aspect(&self) -> f32 {
        self.surface_config.aspect()
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.surface_config.width = size.width;
            self.surface_config.height = size.height;
            self.surface.configure(&self.device, &self.surface_config);
            self.depth_view = Self::create_depth_view(&self.device, &self.surface_config);
        }
    }

    pub fn render(state: &mut State) {
        let State {
            gfx_state,
            camera_ctx,
            rain,
            smoke,
            model,
            clear_color,
            ..
        } = state;

        let output_frame = match gfx_state.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated) => {
                return;
            }
            Err(wgpu::SurfaceError::Lost) => {
                gfx_state.surface.configure(&gfx_state.device, &gfx_state.surface_config);
                return;
            }
            Err(e) => {
                log::warn!("Dropped frame with error: {}", e);
                return;
            }
        };

        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gfx_state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear((*clear_color).into()),
                        store: true,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gfx_state.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: true,
                    }),
                    stencil_ops: None,
                }),
            });

            // Opaque first, particles blend over it
            if let Some(model) = model {
                model.render(&mut render_pass, camera_ctx);
            }

            rain.render(&gfx_state.queue, &mut render_pass, camera_ctx);
            smoke.render(&gfx_state.queue, &mut render_pass, camera_ctx);
        }

        gfx_state.queue.submit(iter::once(encoder.finish()));
        output_frame.present();
    }
}
