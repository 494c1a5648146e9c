/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Toggle light/dark mode
    KeyT,
    /// Frame the model
    KeyF,
    Shift,
    Escape,
    MouseLeft,
    MouseMiddle,
    MouseRight,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Pointer movement since the last reset, in physical pixels
    fn pointer_delta(&self) -> (f32, f32);

    /// Scroll since the last reset, in lines (positive = away from the user)
    fn scroll_delta(&self) -> f32;
}

/// What the pointer is doing to the camera this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitGesture {
    Idle,
    Rotate(f32, f32),
    Pan(f32, f32),
}

/// Left drag rotates; right drag, middle drag or shift + left drag pans
pub fn orbit_gesture(controller: &dyn Controller) -> OrbitGesture {
    let (dx, dy) = controller.pointer_delta();
    if dx == 0.0 && dy == 0.0 {
        return OrbitGesture::Idle;
    }

    let left = controller.is_down(Button::MouseLeft);
    let panning = controller.is_down(Button::MouseRight)
        || controller.is_down(Button::MouseMiddle)
        || (left && controller.is_down(Button::Shift));

    if panning {
        OrbitGesture::Pan(dx, dy)
    } else if left {
        OrbitGesture::Rotate(dx, dy)
    } else {
        OrbitGesture::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_button_hash_duplicates() {
        let mut set = HashSet::new();
        set.insert(Button::KeyT);
        set.insert(Button::KeyT);

        assert_eq!(set.len(), 1);
    }

    struct MockController {
        pressed: Vec<Button>,
        delta: (f32, f32),
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.pressed
        }

        fn pointer_delta(&self) -> (f32, f32) {
            self.delta
        }

        fn scroll_delta(&self) -> f32 {
            0.0
        }
    }

    #[test]
    fn test_left_drag_rotates() {
        let controller = MockController {
            pressed: vec![Button::MouseLeft],
            delta: (4.0, -2.0),
        };
        assert_eq!(orbit_gesture(&controller), OrbitGesture::Rotate(4.0, -2.0));
    }

    #[test]
    fn test_right_and_shift_drag_pan() {
        let right = MockController {
            pressed: vec![Button::MouseRight],
            delta: (1.0, 1.0),
        };
        assert_eq!(orbit_gesture(&right), OrbitGesture::Pan(1.0, 1.0));

        let shift_left = MockController {
            pressed: vec![Button::Shift, Button::MouseLeft],
            delta: (1.0, 0.0),
        };
        assert_eq!(orbit_gesture(&shift_left), OrbitGesture::Pan(1.0, 0.0));
    }

    #[test]
    fn test_hover_without_buttons_is_idle() {
        let controller = MockController {
            pressed: vec![],
            delta: (10.0, 10.0),
        };
        assert_eq!(orbit_gesture(&controller), OrbitGesture::Idle);
    }

    #[test]
    fn test_no_motion_is_idle() {
        let controller = MockController {
            pressed: vec![Button::MouseLeft],
            delta: (0.0, 0.0),
        };
        assert_eq!(orbit_gesture(&controller), OrbitGesture::Idle);
    }
}
