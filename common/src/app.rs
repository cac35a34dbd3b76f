//! Window event loop shared by every visualization binary

use crate::GraphicsContext;
use std::time::Instant;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

/// Frame deltas are capped so a stalled window does not teleport the scene
const MAX_FRAME_DT: f32 = 0.1;

/// A scene driven by [`run`]
pub trait Visualization {
    /// Advance the scene by `dt` seconds
    fn update(&mut self, dt: f32);

    /// Draw one frame to the window surface
    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError>;

    fn handle_key(&mut self, _key: KeyCode, _state: ElementState) {}

    fn handle_scroll(&mut self, _delta: f32) {}

    /// Called after the surface has been reconfigured for a new size
    fn resized(&mut self, _gfx: &GraphicsContext) {}

    /// Offer the event to the overlay first; `true` stops further handling
    fn handle_window_event(&mut self, _window: &Window, _event: &WindowEvent) -> bool {
        false
    }
}

/// Open a window, build the scene with `build` and run until the window closes
pub fn run<V, F>(title: &str, width: u32, height: u32, build: F) -> anyhow::Result<()>
where
    V: Visualization,
    F: FnOnce(&GraphicsContext) -> V,
{
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let (mut gfx, event_loop) = pollster::block_on(GraphicsContext::new(title, width, height))?;
    let mut app = build(&gfx);
    let mut last_time = Instant::now();

    log::info!("{title}: {}x{}", gfx.size.width, gfx.size.height);

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                if app.handle_window_event(&gfx.window, event) {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => {
                        gfx.resize(*size);
                        app.resized(&gfx);
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => app.handle_key(*key, *state),
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.handle_scroll(scroll);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let dt = (now - last_time).as_secs_f32().min(MAX_FRAME_DT);
                        last_time = now;

                        app.update(dt);
                        match app.render(&gfx) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                let size = gfx.size;
                                gfx.resize(size);
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("surface out of memory, exiting");
                                elwt.exit();
                            }
                            Err(e) => log::warn!("render error: {e:?}"),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                gfx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
