//! Window event handling for ViewerState, kept in one place next to the
//! event loop.

use winit::event::WindowEvent;

impl crate::ViewerState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position(position.x, position.y);
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => {
                        self.input.process_scroll(y);
                    }
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        // Pixel deltas (touchpads) are much larger per event
                        // than line deltas; scale them down to match.
                        self.input.process_scroll(pos.y as f32 / 20.0);
                    }
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                    self.running = false;
                }
                self.renderer.window.request_redraw();
                false
            }
            _ => false,
        }
    }
}
