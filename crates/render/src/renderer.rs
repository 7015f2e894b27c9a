use crate::field::CubeField;
use glam::{Mat4, Vec3, Vec4};
use ketemine_kernel::Camera;
use std::fmt::Write;

/// Snapshot of the camera, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub front: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            eye: camera.position(),
            front: camera.front(),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            fov_degrees: camera.zoom_level(),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Whether a world-space point lands inside the clip volume
    /// (depth range `[0, 1]`).
    pub fn contains(&self, point: Vec3) -> bool {
        let clip: Vec4 = self.view_projection() * point.extend(1.0);
        clip.w > 0.0
            && clip.x.abs() <= clip.w
            && clip.y.abs() <= clip.w
            && (0.0..=clip.w).contains(&clip.z)
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&Camera::default())
    }
}

/// Renderer-agnostic interface.
///
/// A renderer reads the cube field and a view snapshot, then produces
/// output. It never mutates either.
pub trait Renderer {
    type Output;

    fn render(&self, field: &CubeField, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs and logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// List every visible cube centre, not just the count.
    pub list_visible: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { list_visible: true }
    }

    /// Instances whose centre is inside the view volume.
    pub fn visible(field: &CubeField, view: &RenderView) -> Vec<Vec3> {
        field
            .translations
            .iter()
            .map(|t| Vec3::from_array(*t))
            .filter(|t| view.contains(*t))
            .collect()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, field: &CubeField, view: &RenderView) -> String {
        let visible = Self::visible(field, view);
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Cube field ({} vertices x {} instances) ===",
            field.vertex_count(),
            field.instance_count()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) front=({:.2}, {:.2}, {:.2}) fov={:.1}",
            view.eye.x, view.eye.y, view.eye.z, view.front.x, view.front.y, view.front.z, view.fov_degrees
        );
        let _ = writeln!(out, "Visible: {}/{}", visible.len(), field.instance_count());
        if self.list_visible {
            for p in &visible {
                let _ = writeln!(out, "  ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
            }
        }
        out
    }
}
