//! Orrery - interactive solar-system viewer with a free-flight camera.

mod config;
mod events;
mod state;

use anyhow::Result;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

pub use state::ViewerState;

/// Application handler for winit.
struct App {
    config: config::ViewerConfig,
    state: Option<ViewerState>,
    /// Initialization failure captured in `resumed`, where errors cannot be
    /// returned. `main` turns it into a non-zero exit after the loop ends.
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: config::ViewerConfig) -> Self {
        Self {
            config,
            state: None,
            init_error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("Orrery")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    self.init_error = Some(anyhow::Error::from(e).context("window creation"));
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(ViewerState::new(window.clone(), &self.config)) {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    self.init_error = Some(e.context("renderer initialization"));
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }
}

/// Resolve the process exit result once the event loop has ended: a stored
/// initialization error becomes a non-zero exit, a plain close exits cleanly.
fn exit_result(app: App) -> Result<()> {
    match app.init_error {
        Some(e) => {
            log::error!("Failed to initialize viewer: {:#}", e);
            Err(e)
        }
        None => Ok(()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Orrery — solar system viewer");
    println!("  WASD        move");
    println!("  Mouse       look (Tab to capture/release cursor)");
    println!("  Scroll      zoom (field of view)");
    println!("  Escape      quit");

    let config = config::ViewerConfig::load_or_create();
    log::info!(
        "Window {}x{}, vsync {}",
        config.window_width,
        config.window_height,
        config.vsync
    );

    let event_loop = EventLoop::new()?;
    // Poll keeps redraws flowing even when no events arrive; Wait would stall
    // the orbit animation between inputs.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    exit_result(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_init_error_produces_a_failing_exit() {
        let mut app = App::new(config::ViewerConfig::default());
        app.init_error = Some(anyhow::anyhow!("no suitable GPU adapter"));
        let result = exit_result(app);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("adapter"));
    }

    #[test]
    fn clean_shutdown_exits_ok() {
        let app = App::new(config::ViewerConfig::default());
        assert!(exit_result(app).is_ok());
    }
}
