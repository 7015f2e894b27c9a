/// Turns absolute cursor positions into look offsets.
///
/// The first sample after construction or [`MouseLook::reset`] has nothing to
/// diff against, so it only records the baseline. Without this the camera
/// would jump by the cursor's full distance from the origin.
#[derive(Debug, Clone, Default)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor position and return `(x_offset, y_offset)` since the
    /// previous one. The y offset is reversed since window y grows downward.
    pub fn sample(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let offset = self.last.map(|(last_x, last_y)| (x - last_x, last_y - y));
        self.last = Some((x, y));
        offset
    }

    /// Forget the baseline, e.g. after the cursor was (re)captured.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn has_baseline(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_sets_baseline_only() {
        let mut mouse = MouseLook::new();
        assert_eq!(mouse.sample(960.0, 540.0), None);
        assert!(mouse.has_baseline());
        assert_eq!(mouse.sample(970.0, 530.0), Some((10.0, 10.0)));
        assert_eq!(mouse.sample(960.0, 550.0), Some((-10.0, -20.0)));
    }

    #[test]
    fn reset_swallows_next_jump() {
        let mut mouse = MouseLook::new();
        mouse.sample(0.0, 0.0);
        mouse.reset();
        assert!(!mouse.has_baseline());
        assert_eq!(mouse.sample(5000.0, 5000.0), None);
        assert_eq!(mouse.sample(5001.0, 5000.0), Some((1.0, 0.0)));
    }
}
