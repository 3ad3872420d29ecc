use init::AppSettings;
use model::State;
use winit::event::Event::*;
use winit::event::{ElementState, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{self, WindowId};

pub mod behaviours;
pub mod init;
pub mod loader;
pub mod model;
pub mod shaders;
pub mod texture;
pub mod traits;
mod util;

pub fn start(app_settings: impl AppSettings) -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new();

    let window = window::WindowBuilder::new()
        .with_decorations(true)
        .with_title(app_settings.title())
        .build(&event_loop)?;

    let mut state = State::new(app_settings, window)?;

    event_loop.run(move |event, _, control_flow| {
        let window_id = state.gfx_state.window_id();
        let do_exec = |id: WindowId| id == window_id;

        match event {
            RedrawRequested(id) if do_exec(id) => {
                state.update();
                state.render();
            }
            MainEventsCleared => {
                state.gfx_state.request_redraw();
            }
            DeviceEvent {
                event: winit::event::DeviceEvent::MouseMotion { delta },
                ..
            } => {
                state.process_mouse_motion(delta);
            }
            WindowEvent { event, window_id } if do_exec(window_id) => match event {
                winit::event::WindowEvent::Resized(size) => {
                    state.resize(size);
                }
                winit::event::WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    state.resize(*new_inner_size);
                }
                winit::event::WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                winit::event::WindowEvent::KeyboardInput { input, .. } => {
                    if input.state == ElementState::Pressed
                        && input.virtual_keycode == Some(VirtualKeyCode::Escape)
                    {
                        *control_flow = ControlFlow::Exit;
                    } else {
                        state.process_events(input);
                    }
                }
                winit::event::WindowEvent::MouseInput { button, state: element, .. } => {
                    state.process_mouse_input(button, element);
                }
                winit::event::WindowEvent::MouseWheel { delta, .. } => {
                    state.process_scroll(delta);
                }
                _ => {}
            },
            _ => (),
        }
    });
}
