use crate::action::Action;
use ketemine_kernel::CameraMovement;
use std::collections::HashMap;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Maps physical keys and mouse buttons to actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<KeyCode, Action>,
    buttons: HashMap<MouseButton, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind_key(KeyCode::KeyW, Action::Move(CameraMovement::Forward))
            .bind_key(KeyCode::KeyS, Action::Move(CameraMovement::Backward))
            .bind_key(KeyCode::KeyA, Action::Move(CameraMovement::Left))
            .bind_key(KeyCode::KeyD, Action::Move(CameraMovement::Right))
            .bind_key(KeyCode::Escape, Action::Quit)
            .bind_key(KeyCode::F1, Action::ToggleOverlay)
            .bind_key(KeyCode::Tab, Action::ToggleCapture)
            .bind_button(MouseButton::Right, Action::ToggleCapture);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: HashMap::new(),
            buttons: HashMap::new(),
        }
    }

    /// Bind a key, replacing any previous binding for it.
    pub fn bind_key(&mut self, key: KeyCode, action: Action) -> &mut Self {
        self.keys.insert(key, action);
        self
    }

    pub fn bind_button(&mut self, button: MouseButton, action: Action) -> &mut Self {
        self.buttons.insert(button, action);
        self
    }

    pub fn key(&self, key: KeyCode) -> Option<Action> {
        self.keys.get(&key).copied()
    }

    pub fn button(&self, button: MouseButton) -> Option<Action> {
        self.buttons.get(&button).copied()
    }

    /// Keys currently bound to a camera movement.
    pub fn movement_keys(&self) -> impl Iterator<Item = (KeyCode, CameraMovement)> + '_ {
        self.keys.iter().filter_map(|(key, action)| match action {
            Action::Move(direction) => Some((*key, *direction)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_wasd_and_controls() {
        let b = KeyBindings::default();
        assert_eq!(b.key(KeyCode::KeyW), Some(Action::Move(CameraMovement::Forward)));
        assert_eq!(b.key(KeyCode::KeyD), Some(Action::Move(CameraMovement::Right)));
        assert_eq!(b.key(KeyCode::Escape), Some(Action::Quit));
        assert_eq!(b.key(KeyCode::F1), Some(Action::ToggleOverlay));
        assert_eq!(b.button(MouseButton::Right), Some(Action::ToggleCapture));
        assert_eq!(b.key(KeyCode::KeyQ), None);
        assert_eq!(b.movement_keys().count(), 4);
    }

    #[test]
    fn rebinding_replaces_previous() {
        let mut b = KeyBindings::default();
        b.bind_key(KeyCode::KeyW, Action::Quit);
        assert_eq!(b.key(KeyCode::KeyW), Some(Action::Quit));
        assert_eq!(b.movement_keys().count(), 3);
    }
}
