use crate::action::Action;
use crate::bindings::KeyBindings;
use crate::mouse::MouseLook;
use ketemine_kernel::CameraMovement;
use std::collections::HashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Which devices the GUI overlay currently claims.
///
/// Queried from the overlay each time input is processed, never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayFocus {
    pub keyboard: bool,
    pub pointer: bool,
}

impl OverlayFocus {
    pub const NONE: Self = Self {
        keyboard: false,
        pointer: false,
    };
}

const MOVEMENT_ORDER: [CameraMovement; 4] = [
    CameraMovement::Forward,
    CameraMovement::Backward,
    CameraMovement::Left,
    CameraMovement::Right,
];

/// Input gathered between frames.
///
/// Window callbacks feed raw events in; game states drain look/zoom actions
/// once per frame and poll held movement keys once per fixed update.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: HashSet<KeyCode>,
    mouse: MouseLook,
    captured: bool,
    /// Running sum of raw motion deltas, fed through `mouse` like a cursor.
    virtual_cursor: (f32, f32),
    pending: Vec<Action>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Track a key change. Returns the bound discrete action on press, for
    /// the application to handle (quit, overlay, capture).
    pub fn on_key(&mut self, key: KeyCode, pressed: bool, focus: OverlayFocus) -> Option<Action> {
        if !pressed {
            self.held.remove(&key);
            return None;
        }
        let newly_pressed = self.held.insert(key);
        if focus.keyboard || !newly_pressed {
            return None;
        }
        self.bindings.key(key).filter(|a| !a.is_continuous())
    }

    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        focus: OverlayFocus,
    ) -> Option<Action> {
        if !pressed || focus.pointer {
            return None;
        }
        self.bindings.button(button)
    }

    /// Feed an absolute cursor position. Produces a look action only while
    /// the cursor is captured and the overlay does not own the pointer.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32, focus: OverlayFocus) {
        if !self.captured {
            return;
        }
        let Some((dx, dy)) = self.mouse.sample(x, y) else {
            return;
        };
        if focus.pointer || (dx == 0.0 && dy == 0.0) {
            return;
        }
        match self.pending.last_mut() {
            Some(Action::Look { dx: px, dy: py }) => {
                *px += dx;
                *py += dy;
            }
            _ => self.pending.push(Action::Look { dx, dy }),
        }
    }

    /// Feed a raw relative motion from the mouse device.
    ///
    /// Deltas are summed into a virtual cursor so the first motion after a
    /// capture change only sets the baseline, exactly like absolute samples.
    pub fn on_mouse_motion(&mut self, dx: f32, dy: f32, focus: OverlayFocus) {
        if !self.captured {
            return;
        }
        self.virtual_cursor.0 += dx;
        self.virtual_cursor.1 += dy;
        let (x, y) = self.virtual_cursor;
        self.on_cursor_moved(x, y, focus);
    }

    /// Feed a wheel movement in lines (positive = away from the user).
    pub fn on_scroll(&mut self, lines: f32, focus: OverlayFocus) {
        if focus.pointer || lines == 0.0 {
            return;
        }
        self.pending.push(Action::Zoom(lines));
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Change mouse capture. The next cursor sample becomes a fresh baseline.
    pub fn set_captured(&mut self, captured: bool) {
        if self.captured != captured {
            tracing::debug!(captured, "mouse capture changed");
        }
        self.captured = captured;
        self.mouse.reset();
    }

    pub fn toggle_capture(&mut self) -> bool {
        self.set_captured(!self.captured);
        self.captured
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Movements whose keys are held, in a fixed order. Empty while the
    /// overlay owns the keyboard.
    pub fn movements(&self, focus: OverlayFocus) -> Vec<CameraMovement> {
        if focus.keyboard {
            return Vec::new();
        }
        let active: HashSet<CameraMovement> = self
            .bindings
            .movement_keys()
            .filter(|(key, _)| self.held.contains(key))
            .map(|(_, direction)| direction)
            .collect();
        MOVEMENT_ORDER
            .into_iter()
            .filter(|direction| active.contains(direction))
            .collect()
    }

    /// Take the look/zoom actions gathered since the last drain.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUI_KEYBOARD: OverlayFocus = OverlayFocus {
        keyboard: true,
        pointer: false,
    };
    const GUI_POINTER: OverlayFocus = OverlayFocus {
        keyboard: false,
        pointer: true,
    };

    #[test]
    fn held_keys_map_to_movements() {
        let mut input = InputState::default();
        input.on_key(KeyCode::KeyD, true, OverlayFocus::NONE);
        input.on_key(KeyCode::KeyW, true, OverlayFocus::NONE);
        assert_eq!(
            input.movements(OverlayFocus::NONE),
            vec![CameraMovement::Forward, CameraMovement::Right]
        );
        input.on_key(KeyCode::KeyW, false, OverlayFocus::NONE);
        assert_eq!(input.movements(OverlayFocus::NONE), vec![CameraMovement::Right]);
    }

    #[test]
    fn overlay_keyboard_focus_blocks_movement() {
        let mut input = InputState::default();
        input.on_key(KeyCode::KeyW, true, OverlayFocus::NONE);
        assert!(input.movements(GUI_KEYBOARD).is_empty());
        assert_eq!(input.movements(OverlayFocus::NONE).len(), 1);
    }

    #[test]
    fn discrete_bindings_fire_once_per_press() {
        let mut input = InputState::default();
        assert_eq!(input.on_key(KeyCode::Escape, true, OverlayFocus::NONE), Some(Action::Quit));
        // key repeat
        assert_eq!(input.on_key(KeyCode::Escape, true, OverlayFocus::NONE), None);
        input.on_key(KeyCode::Escape, false, OverlayFocus::NONE);
        assert_eq!(input.on_key(KeyCode::F1, true, GUI_KEYBOARD), None);
        assert_eq!(input.on_key(KeyCode::KeyW, true, OverlayFocus::NONE), None);
    }

    #[test]
    fn cursor_is_ignored_until_captured() {
        let mut input = InputState::default();
        input.on_cursor_moved(10.0, 10.0, OverlayFocus::NONE);
        input.on_cursor_moved(50.0, 10.0, OverlayFocus::NONE);
        assert!(input.drain_actions().is_empty());
    }

    #[test]
    fn capture_resets_baseline_and_merges_looks() {
        let mut input = InputState::default();
        input.set_captured(true);
        input.on_cursor_moved(400.0, 300.0, OverlayFocus::NONE);
        input.on_cursor_moved(410.0, 290.0, OverlayFocus::NONE);
        input.on_cursor_moved(415.0, 290.0, OverlayFocus::NONE);
        assert_eq!(input.drain_actions(), vec![Action::Look { dx: 15.0, dy: 10.0 }]);
        assert!(input.drain_actions().is_empty());

        input.toggle_capture();
        input.toggle_capture();
        input.on_cursor_moved(0.0, 0.0, OverlayFocus::NONE);
        assert!(input.drain_actions().is_empty());
    }

    #[test]
    fn pointer_focus_blocks_look_and_zoom() {
        let mut input = InputState::default();
        input.set_captured(true);
        input.on_cursor_moved(0.0, 0.0, GUI_POINTER);
        input.on_cursor_moved(20.0, 0.0, GUI_POINTER);
        input.on_scroll(1.0, GUI_POINTER);
        assert!(input.drain_actions().is_empty());

        input.on_cursor_moved(25.0, 0.0, OverlayFocus::NONE);
        input.on_scroll(-2.0, OverlayFocus::NONE);
        assert_eq!(
            input.drain_actions(),
            vec![Action::Look { dx: 5.0, dy: 0.0 }, Action::Zoom(-2.0)]
        );
    }

    #[test]
    fn raw_motion_swallows_first_delta_after_capture() {
        let mut input = InputState::default();
        input.on_mouse_motion(30.0, 30.0, OverlayFocus::NONE);
        assert!(input.drain_actions().is_empty());

        input.set_captured(true);
        // Some platforms report one large jump when the cursor is grabbed.
        input.on_mouse_motion(500.0, -200.0, OverlayFocus::NONE);
        assert!(input.drain_actions().is_empty());

        input.on_mouse_motion(4.0, 2.0, OverlayFocus::NONE);
        input.on_mouse_motion(1.0, 1.0, OverlayFocus::NONE);
        assert_eq!(input.drain_actions(), vec![Action::Look { dx: 5.0, dy: -3.0 }]);
    }

    #[test]
    fn right_click_toggles_capture() {
        let mut input = InputState::default();
        assert_eq!(
            input.on_mouse_button(MouseButton::Right, true, OverlayFocus::NONE),
            Some(Action::ToggleCapture)
        );
        assert_eq!(input.on_mouse_button(MouseButton::Right, false, OverlayFocus::NONE), None);
        assert_eq!(input.on_mouse_button(MouseButton::Right, true, GUI_POINTER), None);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut input = InputState::default();
        input.on_key(KeyCode::KeyA, true, OverlayFocus::NONE);
        assert!(input.is_held(KeyCode::KeyA));
        input.release_all();
        assert!(!input.is_held(KeyCode::KeyA));
        assert!(input.movements(OverlayFocus::NONE).is_empty());
    }
}
