use ketemine_kernel::CameraMovement;

/// A high-level intent produced from raw window input.
///
/// Game states consume actions, never raw input events, so the same state
/// logic works whatever device produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate the camera along one of its local axes.
    Move(CameraMovement),
    /// Rotate the camera by a mouse offset (y grows upward).
    Look { dx: f32, dy: f32 },
    /// Narrow (positive) or widen the field of view.
    Zoom(f32),
    /// Show or hide the debug overlay.
    ToggleOverlay,
    /// Grab or release the mouse cursor for mouse-look.
    ToggleCapture,
    /// Ask the application to close.
    Quit,
}

impl Action {
    /// Continuous actions repeat every fixed step while their key is held.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Action::Move(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_are_continuous() {
        assert!(Action::Move(CameraMovement::Forward).is_continuous());
        assert!(!Action::Look { dx: 1.0, dy: 0.0 }.is_continuous());
        assert!(!Action::Zoom(1.0).is_continuous());
        assert!(!Action::Quit.is_continuous());
    }
}
