use glam::{Mat4, Vec3};

/// Pitch limit in degrees used when `look` constrains pitch.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view reachable through `zoom`.
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view reachable through `zoom`.
pub const MAX_ZOOM: f32 = 45.0;

/// Local camera axis a translation happens along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Tunable options for a camera. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per unit of mouse offset.
    pub mouse_sensitivity: f32,
    pub zoom: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: MAX_ZOOM,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Free-fly perspective camera driven by Euler angles.
///
/// `front`, `right` and `up` are always derived from `yaw`/`pitch` and the
/// world up vector, so they form an orthonormal triad after every mutation.
/// The view matrix is built on demand; the projection is cached and rebuilt
/// whenever zoom or aspect ratio changes.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0)
    }
}

impl Camera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(position, world_up, yaw, pitch, CameraSettings::default())
    }

    pub fn with_settings(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
        settings: CameraSettings,
    ) -> Self {
        let zoom = settings.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: settings.movement_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            zoom,
            aspect_ratio: settings.aspect_ratio,
            near: settings.near,
            far: settings.far,
            projection: Mat4::IDENTITY,
        };
        camera.update_vectors();
        camera.update_projection();
        camera
    }

    /// Rotate by a mouse offset. With `constrain_pitch` the pitch is held
    /// inside +-89 degrees so the scene never flips over the poles.
    pub fn look(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
    }

    /// Translate along the camera's local axes.
    pub fn move_in(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Narrow (positive delta) or widen the field of view.
    pub fn zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(MIN_ZOOM, MAX_ZOOM);
        self.update_projection();
    }

    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_ratio = ratio;
        self.update_projection();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Model-view-projection for a model transform.
    pub fn mvp(&self, model: Mat4) -> Mat4 {
        self.view_projection() * model
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        // Order matters: front x world_up gives a right-handed basis.
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.zoom.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!(f.dot(r).abs() < EPS, "front.right = {}", f.dot(r));
        assert!(f.dot(u).abs() < EPS, "front.up = {}", f.dot(u));
        assert!(r.dot(u).abs() < EPS, "right.up = {}", r.dot(u));
        assert!((f.length() - 1.0).abs() < EPS);
        assert!((r.length() - 1.0).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn basis_is_orthonormal_over_yaw_pitch_grid() {
        for yaw in (-360..=360).step_by(15) {
            for pitch in (-89..=89).step_by(7) {
                let cam = Camera::new(Vec3::ZERO, Vec3::Y, yaw as f32, pitch as f32);
                assert_orthonormal(&cam);
            }
        }
    }

    #[test]
    fn basis_stays_orthonormal_after_looks() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0);
        for i in 0..200 {
            cam.look((i % 17) as f32 * 3.0 - 20.0, (i % 11) as f32 * 5.0 - 25.0, true);
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn look_adds_exactly_ten_degrees_of_yaw() {
        let mut cam = Camera::default();
        cam.look(100.0, 0.0, true);
        assert!((cam.yaw() - (-80.0)).abs() < EPS);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn constrained_pitch_never_leaves_limits() {
        let mut cam = Camera::default();
        for _ in 0..50 {
            cam.look(0.0, 500.0, true);
            assert!(cam.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        for _ in 0..50 {
            cam.look(3.0, -731.0, true);
            assert!(cam.pitch() >= -PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn unconstrained_pitch_can_pass_limits() {
        let mut cam = Camera::default();
        cam.look(0.0, 1000.0, false);
        assert!((cam.pitch() - 100.0).abs() < EPS);
    }

    #[test]
    fn zoom_is_clamped_both_ways() {
        let mut cam = Camera::default();
        cam.zoom(1000.0);
        assert_eq!(cam.zoom_level(), MIN_ZOOM);
        cam.zoom(-1000.0);
        assert_eq!(cam.zoom_level(), MAX_ZOOM);
        cam.zoom(5.0);
        assert!((cam.zoom_level() - 40.0).abs() < EPS);
    }

    #[test]
    fn zoom_recomputes_projection() {
        let mut cam = Camera::default();
        let before = cam.projection_matrix();
        cam.zoom(10.0);
        let expected = Mat4::perspective_rh(35.0_f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
        assert_ne!(before, cam.projection_matrix());
        assert!(cam.projection_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn aspect_ratio_change_updates_projection() {
        let mut cam = Camera::default();
        cam.set_aspect_ratio(1.0);
        let expected = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        assert!(cam.projection_matrix().abs_diff_eq(expected, EPS));
        assert_eq!(cam.aspect_ratio(), 1.0);
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let start = Vec3::new(1.0, -2.0, 3.0);
        let mut cam = Camera::new(start, Vec3::Y, 33.0, 12.0);
        cam.move_in(CameraMovement::Forward, 0.37);
        assert!(!cam.position().abs_diff_eq(start, EPS));
        cam.move_in(CameraMovement::Backward, 0.37);
        assert!(cam.position().abs_diff_eq(start, EPS));

        cam.move_in(CameraMovement::Left, 1.5);
        cam.move_in(CameraMovement::Right, 1.5);
        assert!(cam.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn move_uses_speed_and_delta_time() {
        let mut cam = Camera::default();
        cam.move_in(CameraMovement::Forward, 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), EPS));
        cam.move_in(CameraMovement::Right, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(2.5, 0.0, -5.0), EPS));
    }

    #[test]
    fn view_matrix_follows_position_and_front() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0);
        let expected = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 2.0), Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, EPS));

        // The origin lies straight ahead, so it maps onto the view axis.
        let eye_space = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!(eye_space.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), EPS));

        cam.look(900.0, 0.0, true);
        assert!(!cam.view_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn mvp_composes_projection_view_model() {
        let cam = Camera::new(Vec3::new(0.0, 1.0, 3.0), Vec3::Y, -90.0, -10.0);
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let expected = cam.projection_matrix() * cam.view_matrix() * model;
        assert!(cam.mvp(model).abs_diff_eq(expected, EPS));
        assert!(cam.mvp(Mat4::IDENTITY).abs_diff_eq(cam.view_projection(), EPS));
    }

    #[test]
    fn settings_are_applied_and_zoom_clamped() {
        let settings = CameraSettings {
            movement_speed: 10.0,
            mouse_sensitivity: 0.5,
            zoom: 90.0,
            ..CameraSettings::default()
        };
        let mut cam = Camera::with_settings(Vec3::ZERO, Vec3::Y, -90.0, 0.0, settings);
        assert_eq!(cam.zoom_level(), MAX_ZOOM);

        cam.move_in(CameraMovement::Forward, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), EPS));
        cam.look(4.0, 0.0, true);
        assert!((cam.yaw() - -88.0).abs() < EPS);
    }
}
