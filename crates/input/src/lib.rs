//! Input handling: held keys, cursor-look deltas, and scroll-wheel zoom.
//!
//! Events accumulate between frames; the frame's update reads them and then
//! calls [`InputState::end_frame`] to clear per-frame state.
//!
//! Look deltas are derived from absolute cursor positions rather than raw
//! motion events. The first cursor sample after mouse capture is enabled (or
//! after startup) only seeds the last-known position; emitting it as a delta
//! would slew the camera by the whole distance between the cursor's previous
//! free position and wherever capture began.

use glam::Vec2;
use std::collections::HashSet;

/// Per-frame input state fed by winit events.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed since the last `end_frame`.
    keys_pressed: HashSet<KeyCode>,

    /// Last known cursor position, in window coordinates.
    last_cursor: Vec2,
    /// Next cursor sample seeds `last_cursor` instead of producing a delta.
    first_sample: bool,
    /// Look delta accumulated since the last `end_frame`, sign-adjusted so
    /// positive y means "cursor moved up".
    accumulated_look: Vec2,

    /// Whether the cursor is captured for mouse-look.
    cursor_captured: bool,

    /// Scroll wheel delta accumulated since the last `end_frame` (lines, +up).
    accumulated_scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            first_sample: true,
            ..Self::default()
        }
    }

    /// Clear per-frame state. Call at the end of each frame's update, after
    /// the deltas and pressed keys have been consumed.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.accumulated_look = Vec2::ZERO;
        self.accumulated_scroll = 0.0;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process an absolute cursor position. Look deltas only accumulate while
    /// the cursor is captured; the first sample after capture is swallowed.
    pub fn process_cursor_position(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if self.first_sample {
            self.last_cursor = position;
            self.first_sample = false;
            return;
        }
        if self.cursor_captured {
            // Invert y: window coordinates grow downward, camera pitch up.
            self.accumulated_look.x += position.x - self.last_cursor.x;
            self.accumulated_look.y += self.last_cursor.y - position.y;
        }
        self.last_cursor = position;
    }

    /// Process a scroll wheel event (line units, positive = up).
    pub fn process_scroll(&mut self, delta: f32) {
        self.accumulated_scroll += delta;
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Look delta for this frame (sensitivity applied by the camera).
    pub fn look_delta(&self) -> Vec2 {
        self.accumulated_look
    }

    /// Scroll delta for this frame.
    pub fn scroll_delta(&self) -> f32 {
        self.accumulated_scroll
    }

    /// Whether mouse capture is active.
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Enable or disable mouse capture. Enabling re-arms the first-sample
    /// guard so the jump to the grab position is not read as camera motion.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        if captured && !self.cursor_captured {
            self.first_sample = true;
        }
        self.cursor_captured = captured;
    }

    /// Movement axes from held WASD keys: x = strafe (+right), y = forward
    /// (+ahead). Deliberately not normalized; holding two keys moves faster
    /// along the diagonal, matching the classic free-camera feel.
    pub fn movement_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.is_key_held(KeyCode::KeyW) {
            axes.y += 1.0;
        }
        if self.is_key_held(KeyCode::KeyS) {
            axes.y -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyD) {
            axes.x += 1.0;
        }
        if self.is_key_held(KeyCode::KeyA) {
            axes.x -= 1.0;
        }
        axes
    }

    /// Check if quit was requested (Escape).
    pub fn is_quit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Check if the capture toggle was pressed (Tab).
    pub fn is_capture_toggle_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Tab)
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cursor_sample_produces_no_delta() {
        let mut input = InputState::new();
        input.set_cursor_captured(true);
        input.process_cursor_position(400.0, 300.0);
        assert_eq!(input.look_delta(), Vec2::ZERO);

        input.process_cursor_position(410.0, 290.0);
        assert_eq!(input.look_delta(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn capture_toggle_rearms_first_sample() {
        let mut input = InputState::new();
        input.set_cursor_captured(true);
        input.process_cursor_position(0.0, 0.0);
        input.process_cursor_position(5.0, 0.0);
        input.end_frame();
        input.set_cursor_captured(false);
        // Cursor roams freely while uncaptured.
        input.process_cursor_position(900.0, 700.0);
        input.set_cursor_captured(true);
        // Re-capture must not replay the roaming distance.
        input.process_cursor_position(905.0, 700.0);
        assert_eq!(input.look_delta(), Vec2::ZERO);
        input.process_cursor_position(908.0, 700.0);
        assert_eq!(input.look_delta(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn look_delta_ignored_while_uncaptured() {
        let mut input = InputState::new();
        input.process_cursor_position(10.0, 10.0);
        input.process_cursor_position(50.0, 50.0);
        assert_eq!(input.look_delta(), Vec2::ZERO);
    }

    #[test]
    fn scroll_accumulates_and_resets() {
        let mut input = InputState::new();
        input.process_scroll(1.0);
        input.process_scroll(2.0);
        assert_eq!(input.scroll_delta(), 3.0);
        input.end_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }

    #[test]
    fn movement_axes_compose_additively() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        let axes = input.movement_axes();
        assert_eq!(axes, Vec2::new(1.0, 1.0));
        // Not normalized: diagonal magnitude exceeds a single axis.
        assert!(axes.length() > 1.0);

        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert_eq!(input.movement_axes(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn pressed_is_edge_triggered() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Tab, ElementState::Pressed);
        assert!(input.is_capture_toggle_pressed());
        input.end_frame();
        assert!(!input.is_capture_toggle_pressed());
        assert!(!input.is_key_pressed(KeyCode::Tab));
        // Held state persists across frames.
        assert!(input.is_key_held(KeyCode::Tab));
    }

    #[test]
    fn repeated_press_events_do_not_retrigger() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Escape, ElementState::Pressed);
        input.end_frame();
        // OS key-repeat sends Pressed again without an intervening Release.
        input.process_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert!(!input.is_quit_pressed());
    }
}
