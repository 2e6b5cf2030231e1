//! Multipole Field Visualizer
//!
//! Renders the electric potential and field of a ring of alternating point
//! charges and shows the figure in a window.

mod gpu;

use field_simulation::{FieldScene, SceneParams};
use gpu::GpuState;
use plot_renderer::{render_figure, Figure, PlotStyle};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Figure resolution in pixels (plot plus colorbar)
const FIGURE_SIZE: (u32, u32) = (1010, 900);

struct App {
    figure: Figure,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Multipole Field")
            .with_inner_size(winit::dpi::LogicalSize::new(FIGURE_SIZE.0, FIGURE_SIZE.1));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone(), &self.figure)) {
            Ok(gpu_state) => {
                self.gpu_state = Some(gpu_state);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    match gpu_state.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = gpu_state.size();
                            gpu_state.resize(size);
                            if let Some(window) = &self.window {
                                window.request_redraw();
                            }
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }
    }
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = SceneParams::default();
    let scene = FieldScene::from_params(params);

    let figure = match render_figure(&scene, &PlotStyle::default(), FIGURE_SIZE) {
        Ok(figure) => figure,
        Err(e) => {
            log::error!("Failed to render figure: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("✓ Figure rendered ({}x{})", figure.width, figure.height);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    // Static image: only redraw on demand
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        figure,
        window: None,
        gpu_state: None,
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop terminated: {}", e);
    }
}
