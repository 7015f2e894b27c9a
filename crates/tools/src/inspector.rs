use glam::Vec3;
use ketemine_kernel::Camera;
use std::fmt;

/// Read-only camera queries for the overlay and headless runs.
pub struct CameraInspector;

impl CameraInspector {
    pub fn summary(camera: &Camera) -> CameraSummary {
        CameraSummary {
            position: camera.position(),
            front: camera.front(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            fov: camera.zoom_level(),
            aspect_ratio: camera.aspect_ratio(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSummary {
    pub position: Vec3,
    pub front: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect_ratio: f32,
}

impl fmt::Display for CameraSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} fov={:.1} aspect={:.3}",
            self.position.x, self.position.y, self.position.z, self.yaw, self.pitch, self.fov, self.aspect_ratio
        )
    }
}
