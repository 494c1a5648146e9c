use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Buttons that went down since the last reset
    just_pressed: Vec<Button>,
    /// Current mouse position (relative to window)
    mouse_position: Option<(f32, f32)>,
    /// Mouse movement delta since last reset
    mouse_delta: (f32, f32),
    scroll: f32,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            just_pressed: Vec::new(),
            mouse_position: None,
            mouse_delta: (0.0, 0.0),
            scroll: 0.0,
        }
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.set_button(btn, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Record a button transition
    pub fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                    self.just_pressed.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    /// Record a pointer position; the first position only sets the origin
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.mouse_position {
            self.mouse_delta.0 += x - old_x;
            self.mouse_delta.1 += y - old_y;
        }
        self.mouse_position = Some((x, y));
    }

    /// Drop every held button, e.g. when focus is lost mid-drag
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    /// Reset per-frame state (mouse delta, scroll, edge presses)
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
        self.just_pressed.clear();
    }

    /// True if the button went down since the last reset
    pub fn was_pressed(&self, button: Button) -> bool {
        self.just_pressed.contains(&button)
    }

    /// Get current mouse position (if available)
    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyT => Some(Button::KeyT),
            KeyCode::KeyF => Some(Button::KeyF),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Middle => Some(Button::MouseMiddle),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn pointer_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events carry device ids that can't be built in tests, so these
    // drive the public state setters instead

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::MouseLeft));
        assert_eq!(controller.get_down_keys().len(), 0);
        assert_eq!(controller.mouse_position(), None);
        assert_eq!(controller.pointer_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
    }

    #[test]
    fn test_pointer_delta_accumulates() {
        let mut controller = WinitController::new();
        controller.move_pointer(10.0, 10.0);
        assert_eq!(controller.pointer_delta(), (0.0, 0.0));

        controller.move_pointer(15.0, 8.0);
        controller.move_pointer(20.0, 10.0);
        assert_eq!(controller.pointer_delta(), (10.0, 0.0));
    }

    #[test]
    fn test_delta_reset() {
        let mut controller = WinitController::new();
        controller.mouse_delta = (10.0, 5.0);
        controller.scroll = 2.0;
        controller.mouse_position = Some((100.0, 200.0));

        controller.reset_deltas();
        assert_eq!(controller.pointer_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
        // Position should remain
        assert_eq!(controller.mouse_position(), Some((100.0, 200.0)));
    }

    #[test]
    fn test_press_is_edge_triggered() {
        let mut controller = WinitController::new();
        controller.set_button(Button::KeyT, ElementState::Pressed);
        // key repeat
        controller.set_button(Button::KeyT, ElementState::Pressed);
        assert!(controller.was_pressed(Button::KeyT));
        assert_eq!(controller.get_down_keys(), &[Button::KeyT]);

        controller.reset_deltas();
        assert!(!controller.was_pressed(Button::KeyT));
        assert!(controller.is_down(Button::KeyT));

        controller.set_button(Button::KeyT, ElementState::Released);
        assert!(!controller.is_down(Button::KeyT));
    }

    #[test]
    fn test_release_all() {
        let mut controller = WinitController::new();
        controller.set_button(Button::MouseLeft, ElementState::Pressed);
        controller.set_button(Button::Shift, ElementState::Pressed);
        controller.release_all();
        assert!(controller.get_down_keys().is_empty());
        assert!(!controller.is_down(Button::MouseLeft));
    }
}
