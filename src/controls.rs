//! Keyboard bindings and camera drag gestures.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// A discrete action triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ResetClock,
    TogglePause,
    ToggleMesh,
    TogglePoints,
    CycleShading,
    ToggleWireframe,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let command = match key {
            KeyCode::KeyR => Command::ResetClock,
            KeyCode::Space => Command::TogglePause,
            KeyCode::Digit1 => Command::ToggleMesh,
            KeyCode::Digit2 => Command::TogglePoints,
            KeyCode::Digit5 => Command::CycleShading,
            KeyCode::KeyW => Command::ToggleWireframe,
            KeyCode::Escape => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Camera gesture selected by the mouse button being held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Zoom,
    Translate,
}

/// Tracks which mouse button, if any, is dragging the camera.
///
/// A drag only starts from a press the GUI did not consume, but any release of that button ends
/// it, wherever the cursor is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MouseDrag {
    button: Option<MouseButton>,
}

impl MouseDrag {
    pub fn press(&mut self, button: MouseButton) {
        self.button = Some(button);
    }

    pub fn release(&mut self, button: MouseButton) {
        if self.button == Some(button) {
            self.button = None;
        }
    }

    /// Applies a button event; returns `true` when it starts a drag.
    pub fn on_mouse_input(&mut self, state: ElementState, button: MouseButton) -> bool {
        match state {
            ElementState::Pressed => {
                self.press(button);
                true
            }
            ElementState::Released => {
                self.release(button);
                false
            }
        }
    }

    pub fn mode(&self) -> Option<DragMode> {
        match self.button? {
            MouseButton::Left => Some(DragMode::Rotate),
            MouseButton::Right => Some(DragMode::Zoom),
            MouseButton::Middle => Some(DragMode::Translate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bound_keys() {
        assert_eq!(Command::from_key(KeyCode::KeyR), Some(Command::ResetClock));
        assert_eq!(Command::from_key(KeyCode::Space), Some(Command::TogglePause));
        assert_eq!(Command::from_key(KeyCode::Digit5), Some(Command::CycleShading));
        assert_eq!(Command::from_key(KeyCode::Escape), Some(Command::Quit));
    }

    #[test]
    fn ignores_unbound_keys() {
        assert_eq!(Command::from_key(KeyCode::KeyQ), None);
        assert_eq!(Command::from_key(KeyCode::Digit3), None);
    }

    #[test]
    fn buttons_select_drag_mode() {
        let mut drag = MouseDrag::default();
        assert_eq!(drag.mode(), None);
        drag.press(MouseButton::Left);
        assert_eq!(drag.mode(), Some(DragMode::Rotate));
        drag.press(MouseButton::Right);
        assert_eq!(drag.mode(), Some(DragMode::Zoom));
        drag.press(MouseButton::Middle);
        assert_eq!(drag.mode(), Some(DragMode::Translate));
        drag.press(MouseButton::Back);
        assert_eq!(drag.mode(), None);
    }

    #[test]
    fn release_ends_drag_of_same_button_only() {
        let mut drag = MouseDrag::default();
        assert!(drag.on_mouse_input(ElementState::Pressed, MouseButton::Left));
        assert!(!drag.on_mouse_input(ElementState::Released, MouseButton::Right));
        assert_eq!(drag.mode(), Some(DragMode::Rotate));

        assert!(!drag.on_mouse_input(ElementState::Released, MouseButton::Left));
        assert_eq!(drag.mode(), None);
    }

    #[test]
    fn release_without_press_ends_drag() {
        // Press on the scene, release over the control panel: only the release reaches the
        // tracker directly.
        let mut drag = MouseDrag::default();
        drag.press(MouseButton::Middle);
        drag.release(MouseButton::Middle);
        assert_eq!(drag, MouseDrag::default());
    }
}
